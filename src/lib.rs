// Core layer - shared types and configuration
pub mod core;

// Clients layer - sheet, SMS and alerting adapters
pub mod clients;

// Features layer - reminder run steps
pub mod features;

pub use core::{Config, MessageTemplates, ReminderClass};

pub use clients::{
    AlertSink, MessageSender, OpsgenieClient, SheetSource, SmartsheetClient, TwilioClient,
};

pub use features::{
    // Alerts
    AlertReporter,
    // Phone
    PhoneNumberNormalizer, E164,
    // Reminders
    ReminderPipeline, RunSummary,
    // Sheets
    DeliveryStateRecorder, RecipientExtractor, SheetSchema,
};
