//! API handlers for the contact service.

pub mod contact;
pub mod health;

pub use contact::*;
pub use health::*;

use std::time::Duration;

use crate::contact::ContactService;

/// Shared state for the contact handler.
#[derive(Clone)]
pub struct AppState {
    /// Submission pipeline.
    pub service: ContactService,
    /// Upper bound for a single submission, relay included.
    pub request_timeout: Duration,
}

impl AppState {
    /// Create a new application state.
    pub fn new(service: ContactService, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }
}
