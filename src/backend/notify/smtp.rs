/**
 * SMTP Notifier
 *
 * Sends notifications through an authenticated SMTP relay using lettre's
 * async transport on the tokio runtime. The configured account is both the
 * login and the `From` address.
 *
 * # Readiness
 *
 * `verify` opens a connection and authenticates once. It is called at startup
 * purely to log whether mail is deliverable; sending does not depend on it.
 */

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::backend::notify::{Notifier, NotifyError, OutgoingEmail};

/// Parse an address into a mailbox, keeping the address for the error
pub fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

/// Notifier over an SMTP relay
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier for `host` authenticating as `username`
    ///
    /// No connection is opened here.
    ///
    /// # Errors
    ///
    /// * `NotifyError::Address` - `username` is not a valid sender address
    /// * `NotifyError::Transport` - the relay host could not be configured
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, NotifyError> {
        let sender = mailbox(username)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, sender })
    }

    /// Check connectivity and credentials against the relay
    pub async fn verify(&self) -> Result<bool, NotifyError> {
        Ok(self.transport.test_connection().await?)
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, NotifyError> {
        Ok(Message::builder()
            .from(self.sender.clone())
            .to(mailbox(&email.to)?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let message = self.build_message(email)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Building the pooled transport spawns onto the current tokio runtime
    fn notifier() -> SmtpNotifier {
        SmtpNotifier::new("smtp.example.com", "conference@example.com", "secret").unwrap()
    }

    #[tokio::test]
    async fn test_rejects_invalid_sender() {
        let result = SmtpNotifier::new("smtp.example.com", "not an address", "secret");
        assert!(matches!(result, Err(NotifyError::Address { .. })));
    }

    #[tokio::test]
    async fn test_builds_plain_text_message() {
        let email = OutgoingEmail {
            to: "a@x.com".into(),
            subject: "Submission Confirmation".into(),
            body: "Thank you".into(),
        };
        let message = notifier().build_message(&email).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("To: a@x.com"));
        assert!(formatted.contains("Subject: Submission Confirmation"));
        assert!(formatted.contains("From: conference@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_an_error() {
        let email = OutgoingEmail {
            to: "nobody".into(),
            subject: "s".into(),
            body: "b".into(),
        };
        assert!(matches!(
            notifier().build_message(&email),
            Err(NotifyError::Address { .. })
        ));
    }
}
