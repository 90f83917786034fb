use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use tracing::error;

/// JSON error envelope shared by every handler:
/// `{"success": false, "message": .., "error": {"message": .., "details": ..}}`
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
    pub details: Option<Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail, details: None }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let error_message = self.detail.unwrap_or_else(|| self.message.clone());
        let body = json!({
            "success": false,
            "message": self.message,
            "error": { "message": error_message, "details": self.details },
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Validation(ref failed) => {
                let details = serde_json::to_value(&failed.violations).unwrap_or(Value::Null);
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())).with_details(details)
            }
            ServiceError::StorageCorrupt(_) | ServiceError::Storage(_) => {
                error!(err = %e, "product storage failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

impl From<models::ValidationFailed> for JsonApiError {
    fn from(e: models::ValidationFailed) -> Self {
        ServiceError::Validation(e).into()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => JsonApiError::unauthorized("invalid credentials"),
            AuthError::TokenError(_) => {
                error!(err = %e, code = e.code(), "token issuance failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}
