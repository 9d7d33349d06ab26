use crate::contract::DeliveryNotificationRequest;

pub const MESSAGE_CHARSET: &str = "UTF-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

pub fn delivery_update_subject(delivery_name: &str) -> String {
    format!("Atualização de Entrega: {delivery_name}")
}

pub fn delivery_update_text(delivery_name: &str) -> String {
    format!("Olá, aqui está a atualização sobre a entrega {delivery_name}.")
}

/// Builds the delivery-update email for a validated request.
///
/// The delivery name is substituted verbatim into every part.
pub fn build_delivery_update(request: &DeliveryNotificationRequest) -> EmailMessage {
    let subject = delivery_update_subject(&request.delivery_name);
    let text_body = delivery_update_text(&request.delivery_name);
    let html_body = format!(
        "<html>\n\
         <head></head>\n\
         <body>\n\
         <h1>{subject}</h1>\n\
         <p>{text_body}</p>\n\
         </body>\n\
         </html>\n"
    );

    EmailMessage {
        to: request.recipient.clone(),
        subject,
        text_body,
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(delivery_name: &str) -> DeliveryNotificationRequest {
        DeliveryNotificationRequest {
            delivery_name: delivery_name.to_string(),
            recipient: "a@b.com".to_string(),
        }
    }

    #[test]
    fn subject_and_text_name_the_delivery() {
        let message = build_delivery_update(&request("Pacote123"));

        assert_eq!(message.to, "a@b.com");
        assert_eq!(message.subject, "Atualização de Entrega: Pacote123");
        assert_eq!(
            message.text_body,
            "Olá, aqui está a atualização sobre a entrega Pacote123."
        );
    }

    #[test]
    fn html_body_repeats_subject_and_text() {
        let message = build_delivery_update(&request("Pacote123"));

        assert!(message
            .html_body
            .contains("<h1>Atualização de Entrega: Pacote123</h1>"));
        assert!(message
            .html_body
            .contains("<p>Olá, aqui está a atualização sobre a entrega Pacote123.</p>"));
        assert!(message.html_body.starts_with("<html>"));
    }
}
