//! Liveness and readiness probes.

use axum::Json;

use crate::web::dto::HealthResponse;

/// Service name reported by the probes.
pub const SERVICE_NAME: &str = "contact-form-api";

fn probe(status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    probe("healthy")
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service accepts traffic", body = HealthResponse)
    )
)]
pub async fn readiness_check() -> Json<HealthResponse> {
    probe("ready")
}
