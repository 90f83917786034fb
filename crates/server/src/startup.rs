use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth};
use service::{
    auth::{service::AuthConfig, token::TokenConfig, AuthService, TokenService},
    products::ProductService,
    storage::{JsonFileProductStore, ProductStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Wire the file-backed store, the product service and the auth services.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<auth::ServerState> {
    let store: Arc<dyn ProductStore> = JsonFileProductStore::new(&cfg.storage.products_path).await?;
    let products = Arc::new(ProductService::new(store));

    let tokens = Arc::new(TokenService::new(TokenConfig {
        secret: cfg.auth.jwt_secret.clone(),
        issuer: cfg.auth.issuer.clone(),
        audience: cfg.auth.audience.clone(),
        ttl: chrono::Duration::minutes(cfg.auth.token_ttl_minutes),
    }));
    let auth_svc = Arc::new(AuthService::new(
        AuthConfig {
            login_email: cfg.auth.login_email.clone(),
            login_password: cfg.auth.login_password.clone(),
            user_id: cfg.auth.login_user_id.clone(),
        },
        Arc::clone(&tokens),
    ));

    Ok(auth::ServerState { products, auth: auth_svc, tokens })
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET not set; using the built-in development secret");
    }

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, products_path = %cfg.storage.products_path, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
