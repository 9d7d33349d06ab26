use aws_config::{BehaviorVersion, Region};
use delivery_notifier_lambda::adapters::mailer::{EmailSender, NoopEmailSender};
use delivery_notifier_lambda::adapters::ses::SesEmailSender;
use delivery_notifier_lambda::config::NotifierConfig;
use delivery_notifier_lambda::handlers::notify::{handle_notification_event, ApiGatewayResponse};
use delivery_notifier_lambda::observability::{init_tracing, LogFormat};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

async fn build_sender(config: &NotifierConfig) -> Box<dyn EmailSender> {
    if config.dry_run {
        return Box::new(NoopEmailSender);
    }

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.ses_region.clone()))
        .load()
        .await;
    Box::new(SesEmailSender::new(
        aws_sdk_sesv2::Client::new(&aws_config),
        config.sender_address.clone(),
    ))
}

async fn handle_request(
    event: LambdaEvent<Value>,
    sender: &dyn EmailSender,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_notification_event(event.payload, sender))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(LogFormat::from_env());

    let config = NotifierConfig::from_env();
    info!(
        component = "notifier",
        sender_address = %config.sender_address,
        ses_region = %config.ses_region,
        dry_run = config.dry_run,
        "cold_start"
    );

    let sender = build_sender(&config).await;
    let sender_ref = sender.as_ref();
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, sender_ref).await
    }))
    .await
}
