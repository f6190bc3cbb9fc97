//! Outbound email.
//!
//! DESIGN
//! ======
//! Handlers talk to a [`Mailer`] trait object held in `AppState`. Production
//! uses Resend; without credentials the server falls back to [`LogMailer`],
//! which writes the message to the log so reset links still work locally.

use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use crate::config::EmailConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Provider-neutral email delivery. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Delivery`] if the provider rejects the message.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

// =============================================================================
// RESEND
// =============================================================================

pub struct ResendMailer {
    client: Resend,
    from: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(config: &EmailConfig) -> Self {
        Self { client: Resend::new(&config.api_key), from: config.from.clone() }
    }
}

#[async_trait::async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let to = [email.to.as_str()];
        let options = CreateEmailBaseOptions::new(&self.from, to, &email.subject).with_html(&email.html);
        self.client
            .emails
            .send(options)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;
        Ok(())
    }
}

// =============================================================================
// LOG
// =============================================================================

/// Development mailer: logs instead of sending.
pub struct LogMailer;

#[async_trait::async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        tracing::warn!(to = %email.to, subject = %email.subject, "email delivery not configured; logging message");
        tracing::info!(body = %email.html, "outgoing email");
        Ok(())
    }
}

#[cfg(test)]
#[path = "mailer_test.rs"]
mod tests;
