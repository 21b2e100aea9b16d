//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::MessageResponse;
use crate::contact::{ContactOutcome, ValidationError};

/// Message for bodies that cannot be parsed into a contact request.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Message for unexpected server faults.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned once a client exhausts its rate limit.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Too many requests (429).
    TooManyRequests,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error type.
///
/// Rendered as `{"success": false, "message": ...}` with the status of its
/// [`ErrorCode`].
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a rate limit error.
    pub fn too_many_requests() -> Self {
        Self::new(ErrorCode::TooManyRequests, RATE_LIMITED_MESSAGE)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error for a request body that could not be parsed.
    pub fn invalid_body() -> Self {
        Self::bad_request(INVALID_BODY_MESSAGE)
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        (status, Json(MessageResponse::failure(self.message))).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

/// Map a failed submission to an API error.
///
/// Returns `None` for [`ContactOutcome::Sent`].
pub fn outcome_error(outcome: &ContactOutcome) -> Option<ApiError> {
    match outcome {
        ContactOutcome::Sent => None,
        ContactOutcome::Invalid(err) => Some((*err).into()),
        ContactOutcome::RelayFailed => Some(ApiError::internal(outcome.message())),
    }
}
