//! # Reminder Message Bodies
//!
//! One opaque SMS body per reminder class, loaded from YAML.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::config::Config;
use super::reminder_class::ReminderClass;

const DEFAULT_BODY_72_HOURS: &str = "72 hours message template";
const DEFAULT_BODY_24_HOURS: &str = "24 hours message template";

/// SMS limit for a single concatenated message (10 segments of 153 chars)
const MAX_BODY_LEN: usize = 1530;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageTemplates {
    pub seventy_two_hours: String,
    pub twenty_four_hours: String,
}

impl MessageTemplates {
    /// Load message bodies from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let templates: MessageTemplates = serde_yaml::from_str(&contents)?;
        templates.validate()?;
        Ok(templates)
    }

    /// YAML file when present, otherwise the SMS_BODY_* variables, otherwise built-in bodies
    pub fn from_config(config: &Config) -> Result<Self> {
        if Path::new(&config.messages_path).exists() {
            return Self::load(&config.messages_path);
        }

        let templates = MessageTemplates {
            seventy_two_hours: config
                .sms_body_72_hours
                .clone()
                .unwrap_or_else(|| DEFAULT_BODY_72_HOURS.to_string()),
            twenty_four_hours: config
                .sms_body_24_hours
                .clone()
                .unwrap_or_else(|| DEFAULT_BODY_24_HOURS.to_string()),
        };
        templates.validate()?;
        Ok(templates)
    }

    pub fn validate(&self) -> Result<()> {
        for class in ReminderClass::RUN_ORDER {
            let body = self.body_for(class);
            if body.trim().is_empty() {
                return Err(anyhow::anyhow!("Message body for {class} reminder is empty"));
            }
            if body.chars().count() > MAX_BODY_LEN {
                return Err(anyhow::anyhow!(
                    "Message body for {} reminder too long (max {} chars)",
                    class,
                    MAX_BODY_LEN
                ));
            }
        }
        Ok(())
    }

    pub fn body_for(&self, class: ReminderClass) -> &str {
        match class {
            ReminderClass::SeventyTwoHour => &self.seventy_two_hours,
            ReminderClass::TwentyFourHour => &self.twenty_four_hours,
        }
    }
}
