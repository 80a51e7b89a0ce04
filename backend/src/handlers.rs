use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    middleware,
    response::{IntoResponse, Json},
};
use serde_json::json;
use std::time::Instant;
use tracing::{info, warn};

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Logs one line per request with its status and latency.
pub async fn log_request_middleware(
    request: Request<Body>,
    next: middleware::Next,
) -> Result<Response<Body>, StatusCode> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if status.is_client_error() || status.is_server_error() {
        warn!("{} {} -> {} ({:.2} ms)", method, path, status, elapsed_ms);
    } else {
        info!("{} {} -> {} ({:.2} ms)", method, path, status, elapsed_ms);
    }

    Ok(response)
}
