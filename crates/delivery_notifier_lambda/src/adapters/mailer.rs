use thiserror::Error;
use tracing::info;

use crate::runtime::message::EmailMessage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

/// Rejection reported by the email provider (credentials, unverified sender,
/// malformed address, quota).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ProviderError {
    detail: String,
}

impl ProviderError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

pub trait EmailSender: Send + Sync {
    fn send_email(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError>;
}

/// Accepts every message without contacting a provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEmailSender;

impl EmailSender for NoopEmailSender {
    fn send_email(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError> {
        info!(
            component = "noop_sender",
            to = %message.to,
            subject = %message.subject,
            "email_skipped"
        );
        Ok(SendReceipt::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sender_accepts_without_message_id() {
        let message = EmailMessage {
            to: "a@b.com".to_string(),
            subject: "s".to_string(),
            text_body: "t".to_string(),
            html_body: "<p>t</p>".to_string(),
        };

        let receipt = NoopEmailSender
            .send_email(&message)
            .expect("noop sender never fails");
        assert_eq!(receipt, SendReceipt { message_id: None });
    }
}
