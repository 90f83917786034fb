#![allow(dead_code)]
use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use configs::AppConfig;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use server::routes;

pub const SECRET: &str = "integration-secret-integration-secret";

pub struct TestApp {
    pub router: Router,
    pub products_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(dir) = self.products_path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

pub fn test_config(products_path: &PathBuf) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.products_path = products_path.display().to_string();
    cfg.auth.jwt_secret = SECRET.into();
    cfg
}

/// Router over a fresh file-backed store in its own temp directory.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    let products_path = std::env::temp_dir()
        .join(format!("catalog_api_{}", Uuid::new_v4()))
        .join("products.json");
    let cfg = test_config(&products_path);
    let state = server::build_state(&cfg).await?;
    let router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    Ok(TestApp { router, products_path })
}

pub async fn send(app: &TestApp, req: Request<Body>) -> anyhow::Result<Response<Body>> {
    Ok(app.router.clone().oneshot(req).await?)
}

pub async fn body_json(resp: Response<Body>) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    Ok(builder.body(Body::from(serde_json::to_vec(body)?))?)
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    Ok(builder.body(Body::empty())?)
}

pub async fn login(app: &TestApp) -> anyhow::Result<String> {
    let req = json_request(
        "POST",
        "/api/auth/login",
        None,
        &serde_json::json!({"email": "test@test.com", "password": "123456"}),
    )?;
    let resp = send(app, req).await?;
    anyhow::ensure!(resp.status().is_success(), "login failed: {}", resp.status());
    let body = body_json(resp).await?;
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}
