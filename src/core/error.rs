//! Error taxonomy for the reminder run
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Added `PartialUpdate` for marks that only reached some of the matching rows
//! - 1.0.0: Initial split of schema, validation and lookup errors

use thiserror::Error;

/// Sheet does not have the shape the run depends on. Always fatal.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(
        "filter '{0}' not found. Make sure both 72_hours_reminder and 24_hours_reminder filters exist on the sheet"
    )]
    FilterNotFound(String),
    #[error(
        "column '{0}' not found. Required columns: End User, Telephone Number, 24 hours reminder sent, 72 hours reminder sent"
    )]
    ColumnNotFound(String),
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// A phone number that could not be parsed, or parsed but is not a valid
/// number for its region. Carries the original input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid phone number: {raw:?}")]
pub struct InvalidPhoneNumber {
    pub raw: String,
}

impl InvalidPhoneNumber {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// Failure to record a delivered reminder back into the sheet
#[derive(Debug, Error)]
pub enum MarkError {
    #[error(transparent)]
    InvalidPhoneNumber(#[from] InvalidPhoneNumber),
    #[error("phone number {0} not found in sheet")]
    NumberNotFound(String),
    #[error("marked {marked} of {total} matching rows, last failure: {reason}")]
    PartialUpdate {
        marked: usize,
        total: usize,
        reason: String,
    },
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Reminder class given as text that maps to neither lead time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid reminder class '{0}'. Valid values: 24, 72")]
pub struct InvalidReminderClass(pub String);
