//! SMTP implementation of the mail relay port.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::template::render_contact_email;
use crate::config::{ContactConfig, SmtpConfig};
use crate::contact::{Contact, MailRelay, RelayError};
use crate::{MailerError, Result};

/// Mail relay that submits contact emails to an SMTP server.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    subject_prefix: String,
    send_timeout: Duration,
}

impl SmtpRelay {
    /// Create a relay from explicit configuration.
    ///
    /// No connection is opened here; the server is contacted on each send.
    pub fn from_config(smtp: &SmtpConfig, contact: &ContactConfig) -> Result<Self> {
        let from: Mailbox = smtp.sender_address().parse().map_err(|_| {
            MailerError::Config(format!("invalid sender address: {}", smtp.sender_address()))
        })?;
        let to: Mailbox = contact.receiver.parse().map_err(|_| {
            MailerError::Config(format!("invalid receiver address: {}", contact.receiver))
        })?;

        let builder = match smtp.tls.as_str() {
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host),
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
                .map_err(|e| MailerError::Smtp(e.to_string()))?,
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|e| MailerError::Smtp(e.to_string()))?,
        };

        let timeout = Duration::from_secs(smtp.timeout_secs);
        let mut builder = builder.port(smtp.port).timeout(Some(timeout));

        if !smtp.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
            subject_prefix: contact.subject_prefix.clone(),
            // Covers connect, auth and DATA; lettre's timeout applies per command.
            send_timeout: timeout * 3,
        })
    }

    /// Build the notification message for a contact.
    ///
    /// `Reply-To` is omitted when the submitter address passes form
    /// validation but is not a valid RFC 5322 mailbox.
    pub fn build_message(&self, contact: &Contact) -> std::result::Result<Message, RelayError> {
        let mut builder = Message::builder().from(self.from.clone()).to(self.to.clone());

        match contact.email().parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(e) => tracing::warn!(
                email = contact.email(),
                error = %e,
                "Submitter address is not a valid mailbox, sending without Reply-To"
            ),
        }

        builder
            .subject(format!("{}{}", self.subject_prefix, contact.subject()))
            .header(ContentType::TEXT_HTML)
            .body(render_contact_email(contact))
            .map_err(|e| RelayError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, contact: &Contact) -> std::result::Result<(), RelayError> {
        let message = self.build_message(contact)?;

        match tokio::time::timeout(self.send_timeout, self.transport.send(message)).await {
            Ok(Ok(_)) => {
                tracing::info!(to = %self.to, "Contact email relayed");
                Ok(())
            }
            Ok(Err(e)) => Err(RelayError::Transport(e.to_string())),
            Err(_) => Err(RelayError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            username: "bot@example.com".to_string(),
            password: "secret".to_string(),
            sender: None,
            tls: "none".to_string(),
            timeout_secs: 2,
        }
    }

    fn contact_config() -> ContactConfig {
        ContactConfig {
            receiver: "owner@example.com".to_string(),
            subject_prefix: "[Portfolio Contact] ".to_string(),
        }
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8(message.formatted()).unwrap()
    }

    #[tokio::test]
    async fn test_build_message_headers() {
        let relay = SmtpRelay::from_config(&smtp_config(), &contact_config()).unwrap();
        let contact = Contact::new("Jane Doe", "jane@example.com", "Hello", "Hi there").unwrap();

        let message = relay.build_message(&contact).unwrap();
        let raw = formatted(&message);

        assert!(raw.contains("From: bot@example.com"));
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Reply-To: jane@example.com"));
        assert!(raw.contains("Subject: [Portfolio Contact] Hello"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[tokio::test]
    async fn test_build_message_uses_sender_override() {
        let mut smtp = smtp_config();
        smtp.sender = Some("noreply@example.com".to_string());
        let relay = SmtpRelay::from_config(&smtp, &contact_config()).unwrap();
        let contact = Contact::new("Jane", "jane@example.com", "Hi", "Body").unwrap();

        let raw = formatted(&relay.build_message(&contact).unwrap());
        assert!(raw.contains("From: noreply@example.com"));
    }

    #[tokio::test]
    async fn test_build_message_escapes_body() {
        let relay = SmtpRelay::from_config(&smtp_config(), &contact_config()).unwrap();
        let contact =
            Contact::new("Jane", "jane@example.com", "Hi", "<script>x()</script>").unwrap();

        let raw = formatted(&relay.build_message(&contact).unwrap());
        assert!(!raw.contains("<script>"));
    }

    #[tokio::test]
    async fn test_build_message_without_reply_to_for_unusual_address() {
        let relay = SmtpRelay::from_config(&smtp_config(), &contact_config()).unwrap();

        for email in [
            "jane..doe@example.com",
            ".jane@example.com",
            "jane.@example.com",
            "jane@example..com",
        ] {
            let contact = Contact::new("Jane", email, "Hi", "Body").unwrap();
            let raw = formatted(&relay.build_message(&contact).unwrap());

            assert!(raw.contains("To: owner@example.com"), "{email}");
            assert!(!raw.contains("Reply-To:"), "{email}");
        }
    }

    #[tokio::test]
    async fn test_from_config_rejects_bad_receiver() {
        let mut contact = contact_config();
        contact.receiver = "not-an-address".to_string();
        let result = SmtpRelay::from_config(&smtp_config(), &contact);
        assert!(matches!(result, Err(MailerError::Config(_))));
    }

    #[tokio::test]
    async fn test_send_unreachable_server_fails() {
        let relay = SmtpRelay::from_config(&smtp_config(), &contact_config()).unwrap();
        let contact = Contact::new("Jane", "jane@example.com", "Hi", "Body").unwrap();

        let result = relay.send(&contact).await;
        assert!(matches!(
            result,
            Err(RelayError::Transport(_)) | Err(RelayError::Timeout)
        ));
    }
}
