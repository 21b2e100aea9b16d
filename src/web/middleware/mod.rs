//! Middleware for Web API.

pub mod cors;
pub mod panic;
pub mod rate_limit;
pub mod request_log;
pub mod security;

pub use cors::create_cors_layer;
pub use panic::catch_panic_layer;
pub use rate_limit::{client_key, contact_rate_limit, RateLimitDecision, RateLimitState};
pub use request_log::request_log;
pub use security::security_headers;
