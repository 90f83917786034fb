use std::sync::Arc;

use axum::{extract::{Request, State}, http::header::AUTHORIZATION, middleware::Next, response::Response, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use service::auth::{domain::LoginInput, AuthService, TokenService};
use service::products::ProductService;
use service::storage::ProductStore;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::extract::ApiJson;

#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService<dyn ProductStore>>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
}

#[derive(Serialize)]
pub struct LoginOutput { pub token: String, pub expires: DateTime<Utc> }

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponseDoc), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)))]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<LoginOutput>, JsonApiError> {
    let session = state.auth.login(input)?;
    Ok(Json(LoginOutput { token: session.token.token, expires: session.token.expires_at }))
}

/// Route-layer guard: requires `Authorization: Bearer <token>` signed by this
/// service. Missing, malformed, invalid or expired tokens get 401; verified
/// claims are attached to the request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(token) = token else {
        warn!(path = %path, "missing or malformed Authorization header (expect Bearer)");
        return Err(JsonApiError::unauthorized("missing bearer token"));
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized("invalid or expired token"))
        }
    }
}
