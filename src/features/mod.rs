//! # Features Layer
//!
//! Each submodule owns one step of a reminder run.

pub mod alerts;
pub mod phone;
pub mod reminders;
pub mod sheets;

pub use alerts::AlertReporter;
pub use phone::{PhoneNumberNormalizer, E164};
pub use reminders::{ClassSummary, DeliveryOutcome, MarkStatus, ReminderPipeline, RunSummary};
pub use sheets::{
    DeliveryStateRecorder, Extraction, FilterMap, InvalidNumberBatch, Recipient,
    RecipientExtractor, SheetColumnMap, SheetSchema,
};
