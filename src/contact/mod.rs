//! Contact form submission.
//!
//! This module provides the contact form core:
//! - The validated [`Contact`] entity
//! - The [`MailRelay`] port used to deliver submissions
//! - The [`ContactService`] that ties them together

mod relay;
mod service;
mod types;

pub use relay::{MailRelay, RelayError};
pub use service::{
    ContactInput, ContactOutcome, ContactService, FailureKind, RELAY_FAILURE_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use types::{
    Contact, ValidationError, MAX_EMAIL_LENGTH, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH,
    MAX_SUBJECT_LENGTH,
};
