//! # Feature: Reminder Pipeline
//!
//! One scheduled run: resolve the sheet schema, then for 72 hour and then
//! 24 hour reminders extract recipients, alert on invalid numbers, send each
//! SMS and tick the sheet. Recipients are handled one at a time; a failure
//! for one never stops the rest.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Cooperative cancellation between recipients
//! - 1.1.0: Per-class subset selection
//! - 1.0.0: Initial release

use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::summary::{ClassSummary, DeliveryOutcome, MarkStatus, RunSummary};
use crate::clients::{MessageSender, SheetSource};
use crate::core::{MessageTemplates, ReminderClass, SchemaError};
use crate::features::alerts::AlertReporter;
use crate::features::phone::{PhoneNumberNormalizer, E164};
use crate::features::sheets::{
    DeliveryStateRecorder, Recipient, RecipientExtractor, SheetSchema,
};

pub struct ReminderPipeline {
    sheet: Arc<dyn SheetSource>,
    sender: Arc<dyn MessageSender>,
    alerts: AlertReporter,
    extractor: RecipientExtractor,
    recorder: DeliveryStateRecorder,
    templates: MessageTemplates,
    from_number: E164,
    classes: Vec<ReminderClass>,
    shutdown: Arc<AtomicBool>,
}

impl ReminderPipeline {
    pub fn new(
        sheet: Arc<dyn SheetSource>,
        sender: Arc<dyn MessageSender>,
        alerts: AlertReporter,
        normalizer: PhoneNumberNormalizer,
        templates: MessageTemplates,
        from_number: E164,
    ) -> Self {
        Self {
            sheet,
            sender,
            alerts,
            extractor: RecipientExtractor::new(normalizer),
            recorder: DeliveryStateRecorder::new(normalizer),
            templates,
            from_number,
            classes: ReminderClass::RUN_ORDER.to_vec(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Restrict the run to `classes`; processing order stays fixed
    pub fn with_classes(mut self, classes: &[ReminderClass]) -> Self {
        self.classes = classes.to_vec();
        self
    }

    /// Flag checked between recipients; once set the run stops cleanly
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    fn cancelled(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Fails only on schema problems, before anything has been sent
    pub async fn run(&self) -> Result<RunSummary, SchemaError> {
        info!("Running installs sms reminder");
        let schema = SheetSchema::resolve(self.sheet.as_ref()).await?;

        let mut summary = RunSummary::start();
        for class in ReminderClass::RUN_ORDER {
            if !self.classes.contains(&class) {
                continue;
            }
            let class_summary = self.run_class(&schema, class).await;
            let stop = class_summary.cancelled;
            summary.classes.push(class_summary);
            if stop {
                warn!("Run cancelled during {class} reminders");
                break;
            }
        }
        summary.finish();

        for class in &summary.classes {
            info!(
                "{} reminders: {} sent, {} send failed, {} mark failed, {} invalid numbers",
                class.class, class.sent, class.send_failed, class.mark_failed, class.invalid_numbers
            );
        }
        Ok(summary)
    }

    async fn run_class(&self, schema: &SheetSchema, class: ReminderClass) -> ClassSummary {
        let mut summary = ClassSummary::new(class);
        info!("Fetching {class} reminder data from sheet");

        let extraction = match self
            .extractor
            .extract(self.sheet.as_ref(), schema.filters.get(class), &schema.columns)
            .await
        {
            Ok(extraction) => extraction,
            Err(e) => {
                error!("Failed to fetch {class} reminder rows: {e:#}");
                summary.extraction_error = Some(format!("{e:#}"));
                return summary;
            }
        };
        info!("{} sms reminders to send for {class}", extraction.recipients.len());

        summary.invalid_numbers = extraction.invalid.len();
        self.alerts.report_invalid(&extraction.invalid).await;

        let body = self.templates.body_for(class);
        for recipient in extraction.recipients {
            if self.cancelled() {
                summary.cancelled = true;
                break;
            }
            let outcome = self.deliver(schema, class, body, recipient).await;
            summary.record(outcome);
        }

        summary
    }

    /// Send then mark a single recipient; never fails, the outcome says what happened
    async fn deliver(
        &self,
        schema: &SheetSchema,
        class: ReminderClass,
        body: &str,
        recipient: Recipient,
    ) -> DeliveryOutcome {
        let name = recipient.name.as_deref().unwrap_or("<no name>");
        let phone = recipient.phone.to_string();

        let receipt = match self
            .sender
            .send(self.from_number.as_str(), &phone, body)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("SMS not sent to {phone} ({class}): {e:#}. Sheet not marked");
                return DeliveryOutcome {
                    recipient,
                    class,
                    send_succeeded: false,
                    provider_id: None,
                    send_error: Some(format!("{e:#}")),
                    mark: MarkStatus::NotAttempted,
                };
            }
        };
        info!(
            "Sent {class} sms to Name: {name}, Number: {phone} ({})",
            receipt.provider_id
        );

        // A failed mark is reported, never retried by resending
        let mark = match self
            .recorder
            .mark_sent(self.sheet.as_ref(), &schema.columns, &phone, class)
            .await
        {
            Ok(rows) => MarkStatus::Marked { rows },
            Err(e) => {
                error!("SMS sent to {phone} ({class}) but sheet not marked: {e}");
                MarkStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        DeliveryOutcome {
            recipient,
            class,
            send_succeeded: true,
            provider_id: Some(receipt.provider_id),
            send_error: None,
            mark,
        }
    }
}
