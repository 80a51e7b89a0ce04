use axum::http::{header, Method};
use axum::routing::get;
use axum::{middleware, Router};
use shared::PageRegistry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::games::backend_spin_tracker::create_router as create_tracker_router;
use crate::handlers::{health_check, log_request_middleware};

mod config;
mod error;
mod games;
mod handlers;
mod logging;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<Mutex<PageRegistry>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(PageRegistry::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match &config.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(vec![header::CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    }
}

fn build_app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/health_check", get(health_check))
        .nest("/api/tracker", create_tracker_router())
        .layer(cors_layer(config))
        .layer(middleware::from_fn(log_request_middleware))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = ServerConfig::from_env();
    let app = build_app(AppState::new(), &config);

    let addr = config.socket_addr();
    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check_and_nesting() {
        let app = build_app(AppState::default(), &ServerConfig::default());

        let response = app
            .clone()
            .oneshot(Request::get("/api/health_check").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/api/tracker/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
