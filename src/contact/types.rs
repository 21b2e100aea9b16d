//! Contact form entity and field validation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum name length.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum subject length.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Maximum message length.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// `local-part@domain.tld` with an alphabetic TLD of two or more letters.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Contact form validation errors.
///
/// The display text is shown to the client as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty.
    #[error("name is required")]
    NameRequired,

    /// Name is too long.
    #[error("name must be less than 100 characters")]
    NameTooLong,

    /// Email is empty.
    #[error("email is required")]
    EmailRequired,

    /// Email is too long.
    #[error("email must be less than 254 characters")]
    EmailTooLong,

    /// Email does not look like an address.
    #[error("email format is invalid")]
    EmailInvalid,

    /// Subject is empty.
    #[error("subject is required")]
    SubjectRequired,

    /// Subject is too long.
    #[error("subject must be less than 200 characters")]
    SubjectTooLong,

    /// Message is empty.
    #[error("message is required")]
    MessageRequired,

    /// Message is too long.
    #[error("message must be less than 500 characters")]
    MessageTooLong,
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameRequired | ValidationError::NameTooLong => "name",
            ValidationError::EmailRequired
            | ValidationError::EmailTooLong
            | ValidationError::EmailInvalid => "email",
            ValidationError::SubjectRequired | ValidationError::SubjectTooLong => "subject",
            ValidationError::MessageRequired | ValidationError::MessageTooLong => "message",
        }
    }
}

/// A validated contact form submission.
///
/// Only constructible through [`Contact::new`], so every value in circulation
/// has passed validation. Fields are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl Contact {
    /// Create a contact from raw form fields.
    ///
    /// Surrounding whitespace is trimmed before any check. Checks run in field
    /// order (name, email, subject, message) and the first failure is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_mailer::contact::{Contact, ValidationError};
    ///
    /// let contact = Contact::new(" Jane ", "jane@example.com", "Hello", "Hi there").unwrap();
    /// assert_eq!(contact.name(), "Jane");
    ///
    /// let err = Contact::new("", "jane@example.com", "Hello", "Hi").unwrap_err();
    /// assert_eq!(err, ValidationError::NameRequired);
    /// ```
    pub fn new(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, ValidationError> {
        let contact = Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        };
        contact.validate()?;
        Ok(contact)
    }

    /// Run the field checks against the stored values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_subject(&self.subject)?;
        validate_message(&self.message)?;
        Ok(())
    }

    /// Sender name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Subject line as entered by the sender.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.is_empty() {
        return Err(ValidationError::SubjectRequired);
    }
    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        return Err(ValidationError::SubjectTooLong);
    }
    Ok(())
}

fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.is_empty() {
        return Err(ValidationError::MessageRequired);
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(())
}
