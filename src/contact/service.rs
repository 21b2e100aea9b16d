//! Contact submission service.
//!
//! Validates a raw form submission, hands it to the mail relay and reports a
//! tagged outcome so callers can tell client mistakes from delivery failures
//! without inspecting message text.

use std::sync::Arc;

use super::relay::MailRelay;
use super::types::{Contact, ValidationError};

/// Message returned when the email was relayed.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully";

/// Message returned for any relay failure.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to send email. Please try again later.";

/// Raw, unvalidated form fields.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactInput {
    /// Create a new contact input.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Who caused a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The submitted data was invalid.
    Client,
    /// The relay could not deliver the message.
    Server,
}

/// Result of a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The email was handed to the relay.
    Sent,
    /// The submission failed validation; the relay was not called.
    Invalid(ValidationError),
    /// The relay failed. Transport detail is logged, not carried.
    RelayFailed,
}

impl ContactOutcome {
    /// Whether the email was sent.
    pub fn is_success(&self) -> bool {
        matches!(self, ContactOutcome::Sent)
    }

    /// Message suitable for the client.
    pub fn message(&self) -> String {
        match self {
            ContactOutcome::Sent => SUCCESS_MESSAGE.to_string(),
            ContactOutcome::Invalid(err) => err.to_string(),
            ContactOutcome::RelayFailed => RELAY_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Failure classification, `None` on success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ContactOutcome::Sent => None,
            ContactOutcome::Invalid(_) => Some(FailureKind::Client),
            ContactOutcome::RelayFailed => Some(FailureKind::Server),
        }
    }
}

/// Service for contact form submissions.
///
/// Holds no per-request state; clones share the same relay.
#[derive(Clone)]
pub struct ContactService {
    relay: Arc<dyn MailRelay>,
}

impl ContactService {
    /// Create a new ContactService backed by the given relay.
    pub fn new(relay: Arc<dyn MailRelay>) -> Self {
        Self { relay }
    }

    /// Validate and relay a submission.
    ///
    /// The relay is called exactly once when validation passes and never when
    /// it fails.
    pub async fn submit(&self, input: ContactInput) -> ContactOutcome {
        let contact = match Contact::new(&input.name, &input.email, &input.subject, &input.message)
        {
            Ok(contact) => contact,
            Err(e) => {
                tracing::warn!(field = e.field(), error = %e, "Contact validation failed");
                return ContactOutcome::Invalid(e);
            }
        };

        if let Err(e) = self.relay.send(&contact).await {
            tracing::error!(error = %e, "Failed to relay contact email");
            return ContactOutcome::RelayFailed;
        }

        tracing::info!(
            name = contact.name(),
            email = contact.email(),
            "Contact email sent"
        );
        ContactOutcome::Sent
    }
}
