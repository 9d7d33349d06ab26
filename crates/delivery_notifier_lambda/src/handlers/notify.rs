use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::adapters::mailer::{EmailSender, ProviderError};
use crate::runtime::contract::{
    normalize_invocation_event, DeliveryNotificationRequest, MalformedEvent, ValidationError,
};
use crate::runtime::message::build_delivery_update;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Decodes `body` back into the message text it serializes.
    pub fn message(&self) -> Option<String> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Erro ao enviar e-mail: {0}")]
    Provider(#[from] ProviderError),
    #[error("Erro ao processar requisição: {0}")]
    Unexpected(String),
}

impl From<MalformedEvent> for NotifyError {
    fn from(error: MalformedEvent) -> Self {
        Self::Unexpected(error.detail().to_string())
    }
}

impl NotifyError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Provider(_) | Self::Unexpected(_) => 500,
        }
    }
}

/// Validates the invocation event and sends one delivery-update email.
///
/// Every outcome, including provider rejections, is reported as a response;
/// the sender is only reached once both fields have validated.
pub fn handle_notification_event(event: Value, sender: &dyn EmailSender) -> ApiGatewayResponse {
    match notify(event, sender) {
        Ok(recipient) => message_response(
            200,
            &format!("E-mail enviado com sucesso para: {recipient}"),
        ),
        Err(notify_error) => {
            match &notify_error {
                NotifyError::Validation(validation) => warn!(
                    component = "notifier",
                    missing_fields = ?validation.missing_fields(),
                    "request_rejected"
                ),
                NotifyError::Provider(provider) => error!(
                    component = "notifier",
                    detail = provider.detail(),
                    "email_failed"
                ),
                NotifyError::Unexpected(detail) => error!(
                    component = "notifier",
                    detail = detail.as_str(),
                    "request_failed"
                ),
            }
            message_response(notify_error.status_code(), &notify_error.to_string())
        }
    }
}

fn notify(event: Value, sender: &dyn EmailSender) -> Result<String, NotifyError> {
    debug!(component = "notifier", event = %event, "event_received");

    let payload = normalize_invocation_event(event)?;
    let request = DeliveryNotificationRequest::from_payload(&payload)?;
    info!(
        component = "notifier",
        delivery_name = %request.delivery_name,
        recipient = %request.recipient,
        "request_validated"
    );

    let message = build_delivery_update(&request);
    let receipt = sender.send_email(&message)?;
    info!(
        component = "notifier",
        recipient = %request.recipient,
        message_id = receipt.message_id.as_deref().unwrap_or("-"),
        "email_sent"
    );

    Ok(request.recipient)
}

fn message_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: Value::from(message).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::mailer::SendReceipt;
    use crate::runtime::message::EmailMessage;

    struct CapturingSender {
        messages: Mutex<Vec<EmailMessage>>,
    }

    impl CapturingSender {
        fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }

        fn messages(&self) -> Vec<EmailMessage> {
            self.messages.lock().expect("poisoned mutex").clone()
        }
    }

    impl EmailSender for CapturingSender {
        fn send_email(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError> {
            self.messages
                .lock()
                .expect("poisoned mutex")
                .push(message.clone());
            Ok(SendReceipt {
                message_id: Some("msg-1".to_string()),
            })
        }
    }

    #[test]
    fn rejects_missing_recipient_without_sending() {
        let sender = CapturingSender::new();
        let response = handle_notification_event(json!({"nomeEntrega": "Pacote123"}), &sender);

        assert_eq!(response.status_code, 400);
        assert!(sender.messages().is_empty());
    }

    #[test]
    fn malformed_body_is_a_processing_error() {
        let sender = CapturingSender::new();
        let response = handle_notification_event(json!({"body": "{nomeEntrega"}), &sender);

        assert_eq!(response.status_code, 500);
        let message = response.message().expect("body should be a JSON string");
        assert!(message.starts_with("Erro ao processar requisição: Malformed JSON body"));
        assert!(sender.messages().is_empty());
    }

    #[test]
    fn sends_exactly_one_message_to_recipient() {
        let sender = CapturingSender::new();
        let response = handle_notification_event(
            json!({"body": {"nomeEntrega": "Pacote123", "destinatario": "a@b.com"}}),
            &sender,
        );

        assert_eq!(response.status_code, 200);
        let messages = sender.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "a@b.com");
    }

    #[test]
    fn body_is_serialized_json_text() {
        let response = message_response(200, "E-mail enviado com sucesso para: a@b.com");

        assert_eq!(
            response.body,
            "\"E-mail enviado com sucesso para: a@b.com\""
        );
        assert_eq!(response.headers["Content-Type"], "application/json");
    }

    #[test]
    fn error_kinds_map_to_status_codes() {
        let provider = NotifyError::from(ProviderError::new("MessageRejected"));
        let unexpected = NotifyError::Unexpected("boom".to_string());

        assert_eq!(provider.status_code(), 500);
        assert_eq!(
            provider.to_string(),
            "Erro ao enviar e-mail: MessageRejected"
        );
        assert_eq!(unexpected.status_code(), 500);
    }
}
