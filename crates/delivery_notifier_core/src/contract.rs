use serde_json::{Map, Value};
use thiserror::Error;

pub const DELIVERY_NAME_FIELD: &str = "nomeEntrega";
pub const RECIPIENT_FIELD: &str = "destinatario";
pub const MISSING_PARAMETERS_MESSAGE: &str = "Erro: Parametros obrigatorios nao fornecidos.";

pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryNotificationRequest {
    pub delivery_name: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct MalformedEvent {
    detail: String,
}

impl MalformedEvent {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", MISSING_PARAMETERS_MESSAGE)]
pub struct ValidationError {
    missing_fields: Vec<&'static str>,
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        &self.missing_fields
    }
}

/// Resolves the mapping that carries the notification fields.
///
/// API Gateway proxies wrap the payload under `body` as JSON text, direct
/// invocations may pass it as an object or skip the wrapper entirely.
pub fn normalize_invocation_event(event: Value) -> Result<Payload, MalformedEvent> {
    let Value::Object(mut object) = event else {
        return Err(MalformedEvent::new("Request payload must be a JSON object"));
    };

    let Some(body) = object.remove("body") else {
        return Ok(object);
    };

    match body {
        Value::Null => Err(MalformedEvent::new("Request body must not be null")),
        Value::Object(payload) => Ok(payload),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(payload)) => Ok(payload),
            Ok(_) => Err(MalformedEvent::new("Request body must be a JSON object")),
            Err(error) => Err(MalformedEvent::new(format!("Malformed JSON body: {error}"))),
        },
        _ => Err(MalformedEvent::new("Request body must be a JSON object")),
    }
}

impl DeliveryNotificationRequest {
    pub fn from_payload(payload: &Payload) -> Result<Self, ValidationError> {
        let delivery_name = required_string(payload, DELIVERY_NAME_FIELD);
        let recipient = required_string(payload, RECIPIENT_FIELD);

        match (delivery_name, recipient) {
            (Some(delivery_name), Some(recipient)) => Ok(Self {
                delivery_name: delivery_name.to_string(),
                recipient: recipient.to_string(),
            }),
            (delivery_name, recipient) => {
                let mut missing_fields = Vec::with_capacity(2);
                if delivery_name.is_none() {
                    missing_fields.push(DELIVERY_NAME_FIELD);
                }
                if recipient.is_none() {
                    missing_fields.push(RECIPIENT_FIELD);
                }
                Err(ValidationError { missing_fields })
            }
        }
    }
}

fn required_string<'a>(payload: &'a Payload, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
