use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;

use crate::adapters::mailer::{EmailSender, ProviderError, SendReceipt};
use crate::runtime::message::{EmailMessage, MESSAGE_CHARSET};

/// Sends through the SES v2 `SendEmail` API from a fixed, SES-verified
/// sender address.
pub struct SesEmailSender {
    client: Client,
    from_address: String,
}

impl SesEmailSender {
    pub fn new(client: Client, from_address: impl Into<String>) -> Self {
        Self {
            client,
            from_address: from_address.into(),
        }
    }
}

impl EmailSender for SesEmailSender {
    fn send_email(&self, message: &EmailMessage) -> Result<SendReceipt, ProviderError> {
        let content = build_email_content(message)?;
        let destination = Destination::builder()
            .to_addresses(message.to.clone())
            .build();
        let client = self.client.clone();
        let from_address = self.from_address.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_email()
                    .from_email_address(from_address)
                    .destination(destination)
                    .content(content)
                    .send()
                    .await
                    .map(|output| SendReceipt {
                        message_id: output.message_id().map(str::to_string),
                    })
                    .map_err(|error| ProviderError::new(DisplayErrorContext(&error).to_string()))
            })
        })
    }
}

fn build_email_content(message: &EmailMessage) -> Result<EmailContent, ProviderError> {
    let simple = Message::builder()
        .subject(utf8_content(&message.subject, "subject")?)
        .body(
            Body::builder()
                .text(utf8_content(&message.text_body, "text body")?)
                .html(utf8_content(&message.html_body, "html body")?)
                .build(),
        )
        .build();

    Ok(EmailContent::builder().simple(simple).build())
}

fn utf8_content(data: &str, part: &str) -> Result<Content, ProviderError> {
    Content::builder()
        .data(data)
        .charset(MESSAGE_CHARSET)
        .build()
        .map_err(|error| ProviderError::new(format!("failed to build {part}: {error}")))
}
