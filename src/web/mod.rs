//! HTTP surface of the contact service.
//!
//! Exposes `POST /api/contact`, the `/health` and `/ready` probes and the
//! OpenAPI document, wrapped in rate limiting, CORS and security headers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use middleware::RateLimitState;
pub use router::create_router;
pub use server::WebServer;
