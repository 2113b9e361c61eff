//! # Core Module
//!
//! Configuration, error taxonomy and the types shared by every feature.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add messages module with YAML-loaded SMS bodies
//! - 1.1.0: Add ReminderClass
//! - 1.0.0: Initial creation with config and error modules

pub mod config;
pub mod error;
pub mod messages;
pub mod reminder_class;

// Re-export commonly used items
pub use config::Config;
pub use error::{InvalidPhoneNumber, InvalidReminderClass, MarkError, SchemaError};
pub use messages::MessageTemplates;
pub use reminder_class::ReminderClass;
