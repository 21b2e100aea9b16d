//! Outbound mail relay port.

use async_trait::async_trait;
use thiserror::Error;

use super::types::Contact;

/// Errors raised by a mail relay.
///
/// These carry transport detail for operators and must not be shown to the
/// person who submitted the form.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The transport rejected or failed to deliver the message.
    #[error("transport error: {0}")]
    Transport(String),

    /// The relay did not answer in time.
    #[error("relay timed out")]
    Timeout,
}

/// Capability to deliver a validated contact submission as an email.
///
/// Implementations own delivery concerns such as authentication, timeouts
/// and message formatting. The contact service calls `send` at most once per
/// submission.
#[async_trait]
pub trait MailRelay: Send + Sync + 'static {
    /// Deliver the contact to the configured recipient.
    async fn send(&self, contact: &Contact) -> Result<(), RelayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_error_display() {
        assert_eq!(
            RelayError::Build("missing body".to_string()).to_string(),
            "failed to build message: missing body"
        );
        assert_eq!(
            RelayError::Transport("535 auth failed".to_string()).to_string(),
            "transport error: 535 auth failed"
        );
        assert_eq!(RelayError::Timeout.to_string(), "relay timed out");
    }
}
