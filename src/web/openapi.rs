//! OpenAPI document for the HTTP API.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use super::dto::{ContactRequest, HealthResponse, MessageResponse};

/// OpenAPI description of every public endpoint.
#[derive(OpenApi)]
#[openapi(
    info(title = "Contact Form API", description = "Relays portfolio contact submissions by email"),
    paths(
        super::handlers::contact::submit_contact,
        super::handlers::health::health_check,
        super::handlers::health::readiness_check,
    ),
    components(schemas(ContactRequest, MessageResponse, HealthResponse)),
    tags(
        (name = "Contact", description = "Contact form submission"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Router serving the document at `/api-docs/openapi.json`.
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_paths() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"]["/api/contact"]["post"].is_object());
        assert!(json["paths"]["/health"]["get"].is_object());
        assert!(json["paths"]["/ready"]["get"].is_object());
    }
}
