//! # Sheets Feature
//!
//! Reading reminder recipients out of the tracking sheet and writing
//! delivery state back into it.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod extractor;
pub mod recorder;
pub mod schema;

pub use extractor::{Extraction, InvalidNumberBatch, Recipient, RecipientExtractor};
pub use recorder::DeliveryStateRecorder;
pub use schema::{FilterMap, SheetColumnMap, SheetSchema};
