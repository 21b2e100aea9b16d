//! SMTP delivery for contact submissions.
//!
//! [`SmtpRelay`] implements the [`MailRelay`](crate::contact::MailRelay) port
//! on top of [lettre](https://lettre.rs).

mod relay;
mod template;

pub use relay::SmtpRelay;
pub use template::{escape_html, render_contact_email};
