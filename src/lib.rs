//! contact-mailer - contact form relay service
//!
//! Accepts portfolio contact form submissions over HTTP, validates them and
//! forwards them to the site owner by SMTP.

pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod smtp;
pub mod web;

pub use config::Config;
pub use contact::{Contact, ContactInput, ContactOutcome, ContactService, MailRelay};
pub use error::{MailerError, Result};
pub use smtp::SmtpRelay;
pub use web::WebServer;
