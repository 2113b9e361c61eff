//! # Feature: Invalid Number Alerts
//!
//! Raises one incident per extraction that produced invalid phone numbers.
//! Best-effort: a failed alert is logged and the run carries on.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Description capped to the Opsgenie limit
//! - 1.0.0: Initial release

use log::{info, warn};
use std::sync::Arc;

use crate::clients::{AlertPayload, AlertSink};

pub const ALERT_MESSAGE: &str = "Invalid phone numbers for install sms reminder";
pub const ALERT_PRIORITY: &str = "P3";
pub const ALERT_TAGS: [&str; 3] = ["smartsheet", "installs", "sms_reminder"];

/// Opsgenie rejects aliases longer than this
const MAX_ALIAS_LEN: usize = 512;
/// Opsgenie rejects descriptions longer than this
const MAX_DESCRIPTION_LEN: usize = 15000;

/// Cut `text` to at most `max` bytes on a char boundary
fn truncate_to(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

#[derive(Clone)]
pub struct AlertReporter {
    sink: Arc<dyn AlertSink>,
}

impl AlertReporter {
    pub fn new(sink: Arc<dyn AlertSink>) -> Self {
        Self { sink }
    }

    /// Same batch, same alias, so repeated runs collapse into one open incident
    pub fn build_alert(batch: &[String]) -> AlertPayload {
        let alias = truncate_to(format!("{}-{:?}", batch.len(), batch), MAX_ALIAS_LEN);
        let description = truncate_to(
            format!("{} invalid phone numbers: {:?}", batch.len(), batch),
            MAX_DESCRIPTION_LEN,
        );

        AlertPayload {
            message: ALERT_MESSAGE.to_string(),
            priority: ALERT_PRIORITY.to_string(),
            description,
            tags: ALERT_TAGS.iter().map(|t| t.to_string()).collect(),
            alias,
        }
    }

    pub async fn report_invalid(&self, batch: &[String]) {
        if batch.is_empty() {
            return;
        }

        let alert = Self::build_alert(batch);
        match self.sink.raise_alert(&alert).await {
            Ok(()) => info!("Raised invalid number alert ({})", alert.alias),
            Err(e) => warn!("Failed to raise invalid number alert: {e:#}"),
        }
    }
}
