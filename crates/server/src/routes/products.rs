use axum::{extract::State, http::{header::LOCATION, StatusCode}, response::IntoResponse, Json};
use models::{Product, ProductInput};
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::{ApiJson, ApiPath},
    routes::auth::ServerState,
};

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::ProductDoc]),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let list = state.products.list_products().await?;
    info!(count = list.len(), "list products");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.get_product(id).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    security(("bearer" = [])),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<ProductInput>) -> Result<impl IntoResponse, JsonApiError> {
    // any client-supplied id is discarded by the store
    let product = input.into_product(0)?;
    let created = state.products.add_product(product).await?;
    let location = format!("/api/products/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Id mismatch or Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(State(state): State<ServerState>, ApiPath(id): ApiPath<i64>, ApiJson(input): ApiJson<ProductInput>) -> Result<StatusCode, JsonApiError> {
    if let Some(body_id) = input.id {
        if body_id != id {
            return Err(JsonApiError::bad_request(format!("path id {id} does not match body id {body_id}")));
        }
    }
    let product = input.into_product(id)?;
    state.products.update_product(product).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    security(("bearer" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
