//! Error types for the contact mailer.

use thiserror::Error;

/// Common error type for startup and infrastructure paths.
///
/// Per-request failures are reported through
/// [`ContactOutcome`](crate::contact::ContactOutcome) instead.
#[derive(Error, Debug)]
pub enum MailerError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// SMTP transport setup error.
    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Result type alias for contact mailer operations.
pub type Result<T> = std::result::Result<T, MailerError>;
