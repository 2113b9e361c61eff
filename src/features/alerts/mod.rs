//! # Alerts Feature
//!
//! Operational alerts for data quality problems found during a run.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod reporter;

pub use reporter::AlertReporter;
