//! # Reminders Feature
//!
//! Scheduled SMS reminder runs with per-recipient delivery outcomes.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod pipeline;
pub mod summary;

pub use pipeline::ReminderPipeline;
pub use summary::{ClassSummary, DeliveryOutcome, MarkStatus, RunSummary};
