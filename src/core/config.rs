//! Environment-driven runtime configuration
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: REMINDER_CLASSES to run a subset of reminder classes
//! - 1.1.0: Overridable API base URLs
//! - 1.0.0: Credentials, sheet id and default region

use anyhow::{anyhow, Result};

use super::reminder_class::ReminderClass;

pub const DEFAULT_SMARTSHEET_API_URL: &str = "https://api.smartsheet.com/2.0";
pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com/2010-04-01";
pub const DEFAULT_OPSGENIE_API_URL: &str = "https://api.opsgenie.com";

#[derive(Clone)]
pub struct Config {
    pub smartsheet_token: String,
    pub smartsheet_sheet_id: u64,
    pub smartsheet_api_url: String,
    pub twilio_account_sid: String,
    pub twilio_token: String,
    pub twilio_from_number: String,
    pub twilio_api_url: String,
    pub opsgenie_api_key: String,
    pub opsgenie_api_url: String,
    /// Region assumed for numbers written without a country code
    pub default_region: String,
    pub reminder_classes: Vec<ReminderClass>,
    pub messages_path: String,
    pub sms_body_72_hours: Option<String>,
    pub sms_body_24_hours: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| get(key).ok_or_else(|| anyhow!("{key} must be set"));

        let sheet_id = required("SMARTSHEET_SHEET_ID")?;
        let smartsheet_sheet_id = sheet_id
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("SMARTSHEET_SHEET_ID must be numeric, got '{sheet_id}': {e}"))?;

        let reminder_classes = match get("REMINDER_CLASSES") {
            Some(list) => ReminderClass::parse_list(&list)?,
            None => ReminderClass::RUN_ORDER.to_vec(),
        };

        Ok(Config {
            smartsheet_token: required("SMARTSHEET_TOKEN")?,
            smartsheet_sheet_id,
            smartsheet_api_url: get("SMARTSHEET_API_URL")
                .unwrap_or_else(|| DEFAULT_SMARTSHEET_API_URL.to_string()),
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_token: required("TWILIO_TOKEN")?,
            twilio_from_number: required("TWILIO_FROM_NUMBER")?,
            twilio_api_url: get("TWILIO_API_URL")
                .unwrap_or_else(|| DEFAULT_TWILIO_API_URL.to_string()),
            opsgenie_api_key: required("OPSGENIE_API_KEY")?,
            opsgenie_api_url: get("OPSGENIE_API_URL")
                .unwrap_or_else(|| DEFAULT_OPSGENIE_API_URL.to_string()),
            default_region: get("DEFAULT_REGION")
                .map(|r| r.trim().to_uppercase())
                .unwrap_or_else(|| "GB".to_string()),
            reminder_classes,
            messages_path: get("REMINDER_MESSAGES_PATH")
                .unwrap_or_else(|| "reminders.yaml".to_string()),
            sms_body_72_hours: get("SMS_BODY_72_HOURS"),
            sms_body_24_hours: get("SMS_BODY_24_HOURS"),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
