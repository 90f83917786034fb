use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponseDoc { pub token: String, pub expires: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub rating: f64,
    pub image_url: Option<String>,
    pub specifications: BTreeMap<String, String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInputDoc {
    pub id: Option<i64>,
    /// 2 to 100 characters
    pub name: String,
    /// Strictly greater than 0
    pub price: f64,
    /// At most 500 characters
    pub description: Option<String>,
    /// Between 0 and 5
    pub rating: f64,
    /// At most 2000 characters
    pub image_url: Option<String>,
    /// Required, may be empty
    pub specifications: BTreeMap<String, String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub success: bool, pub message: String, pub error: ErrorBodyDoc }

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub message: String, pub details: Option<Vec<ViolationDoc>> }

#[derive(ToSchema)]
pub struct ViolationDoc { pub field: String, pub message: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponseDoc,
            ProductDoc,
            ProductInputDoc,
            ErrorDoc,
            ErrorBodyDoc,
            ViolationDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "products")
    )
)]
pub struct ApiDoc;
