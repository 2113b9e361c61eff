use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use installs_sms_reminder::clients::{
    http_client, AlertSink, MessageSender, OpsgenieClient, SheetSource, SmartsheetClient,
    TwilioClient,
};
use installs_sms_reminder::core::{Config, MessageTemplates, SchemaError};
use installs_sms_reminder::features::{
    AlertReporter, MarkStatus, PhoneNumberNormalizer, ReminderPipeline, SheetSchema,
};

/// Log which of the required columns the sheet does have
async fn log_column_diagnostics(sheet: &dyn SheetSource) {
    for title in SheetSchema::required_column_titles() {
        match SheetSchema::column_id_by_title(sheet, title).await {
            Ok(Some(id)) => info!("Column '{title}' resolved to {id}"),
            Ok(None) => error!("Column '{title}' is missing"),
            Err(e) => warn!("Could not look up column '{title}': {e:#}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting installs sms reminder...");

    let normalizer = PhoneNumberNormalizer::new(&config.default_region)?;
    let from_number = normalizer
        .normalize(&config.twilio_from_number)
        .map_err(|e| anyhow!("TWILIO_FROM_NUMBER is not usable: {e}"))?;
    let templates = MessageTemplates::from_config(&config)?;
    info!(
        "📄 Message bodies loaded, reminder classes: {:?}",
        config.reminder_classes
    );

    let http = http_client()?;
    let smartsheet = SmartsheetClient::new(
        http.clone(),
        &config.smartsheet_api_url,
        config.smartsheet_token.clone(),
        config.smartsheet_sheet_id,
    );
    info!("Using sheet {}", smartsheet.sheet_id());
    let sheet: Arc<dyn SheetSource> = Arc::new(smartsheet);
    let sender: Arc<dyn MessageSender> = Arc::new(TwilioClient::new(
        http.clone(),
        &config.twilio_api_url,
        config.twilio_account_sid.clone(),
        config.twilio_token.clone(),
    ));
    let alert_sink: Arc<dyn AlertSink> = Arc::new(OpsgenieClient::new(
        http,
        &config.opsgenie_api_url,
        config.opsgenie_api_key.clone(),
    ));

    // Stop after the recipient in flight on Ctrl-C
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current recipient");
            shutdown_flag.store(true, Ordering::SeqCst);
        }
    });

    let pipeline = ReminderPipeline::new(
        sheet.clone(),
        sender,
        AlertReporter::new(alert_sink),
        normalizer,
        templates,
        from_number,
    )
    .with_classes(&config.reminder_classes)
    .with_shutdown(shutdown);

    let summary = match pipeline.run().await {
        Ok(summary) => summary,
        Err(e) => {
            error!("❌ Sheet schema check failed, nothing was sent: {e}");
            if matches!(e, SchemaError::ColumnNotFound(_)) {
                log_column_diagnostics(sheet.as_ref()).await;
            }
            return Err(e.into());
        }
    };

    for failure in summary.failures() {
        let state = match &failure.mark {
            MarkStatus::NotAttempted => "not sent".to_string(),
            MarkStatus::Failed { reason } => format!("sent but not marked: {reason}"),
            MarkStatus::Marked { .. } => "sent".to_string(),
        };
        error!(
            "Reconcile {} ({}): {}",
            failure.recipient.phone, failure.class, state
        );
    }
    info!("Run summary: {}", serde_json::to_string(&summary)?);

    if summary.cancelled() {
        return Err(anyhow!("Run cancelled before all recipients were processed"));
    }
    if !summary.is_clean() {
        return Err(anyhow!(
            "Run finished with failures, see reconcile entries above"
        ));
    }

    info!("✅ Installs sms reminder run complete");
    Ok(())
}
