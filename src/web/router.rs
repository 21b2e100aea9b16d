//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::error::ApiError;
use super::handlers::{health_check, readiness_check, submit_contact, AppState};
use super::middleware::{
    catch_panic_layer, contact_rate_limit, create_cors_layer, request_log, security_headers,
    RateLimitState,
};
use super::openapi::create_openapi_router;
use crate::config::Config;

/// Create the main API router.
///
/// Only `/api/contact` is rate limited. CORS is enforced outside of
/// development.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limit: Arc<RateLimitState>,
    config: &Config,
) -> Router {
    let limiter = rate_limit.clone();
    let contact_routes = Router::new()
        .route("/api/contact", post(submit_contact))
        .route_layer(middleware::from_fn(move |req, next| {
            let state = limiter.clone();
            contact_rate_limit(state, req, next)
        }))
        .with_state(app_state);

    let router = Router::new()
        .merge(contact_routes)
        .merge(create_health_router())
        .merge(create_openapi_router())
        .fallback(not_found);

    let router = if config.is_development() {
        router
    } else {
        router.layer(create_cors_layer(&config.cors.allowed_origins))
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_log))
            .layer(security_headers())
            .layer(catch_panic_layer())
            .layer(CompressionLayer::new()),
    )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
    }
}
