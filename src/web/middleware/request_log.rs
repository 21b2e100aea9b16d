//! Per-request access logging.

use axum::{
    body::Body,
    http::{header::USER_AGENT, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::rate_limit::client_key;

/// Log method, path, status, latency, client IP and user agent for each
/// request.
pub async fn request_log(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let client = client_key(&req);
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), latency_ms, %client, %user_agent, "HTTP request");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), latency_ms, %client, %user_agent, "HTTP request");
    }

    response
}
