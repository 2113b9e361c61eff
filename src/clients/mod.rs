//! # External Service Clients
//!
//! Narrow traits for the three services a reminder run talks to, plus the
//! typed records that cross that boundary. Adapters own all JSON handling;
//! the rest of the crate only sees the records below.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Shared HTTP client with request timeout
//! - 1.0.0: Smartsheet, Twilio and Opsgenie adapters

pub mod opsgenie;
pub mod smartsheet;
pub mod twilio;

#[cfg(test)]
pub mod fake;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use opsgenie::OpsgenieClient;
pub use smartsheet::SmartsheetClient;
pub use twilio::TwilioClient;

pub type FilterId = u64;
pub type ColumnId = u64;
pub type RowId = u64;

/// Upper bound on any single HTTP call made by an adapter
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDescriptor {
    pub id: FilterId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub column_id: ColumnId,
    pub display_value: Option<String>,
}

/// One sheet row as returned under an applied filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub id: RowId,
    /// True when the applied filter excludes this row
    pub filtered_out: bool,
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn display_value(&self, column_id: ColumnId) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.column_id == column_id)
            .and_then(|c| c.display_value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider-side message identifier
    pub provider_id: String,
}

/// Incident payload, field names follow the Opsgenie create-alert body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub message: String,
    pub priority: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Deduplication key; identical aliases collapse into one open incident
    pub alias: String,
}

/// Tabular data source holding recipients and delivery state
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn list_filters(&self) -> Result<Vec<FilterDescriptor>>;

    async fn list_columns(&self) -> Result<Vec<ColumnDescriptor>>;

    /// All rows of the sheet with `filter_id` applied, in sheet order
    async fn filtered_rows(&self, filter_id: FilterId) -> Result<Vec<RawRow>>;

    /// Rows containing a cell whose text equals `text` exactly
    async fn search_exact(&self, text: &str) -> Result<Vec<RowId>>;

    async fn set_checkbox(&self, row_id: RowId, column_id: ColumnId, value: bool) -> Result<()>;
}

/// SMS provider
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<SendReceipt>;
}

/// Incident sink
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn raise_alert(&self, alert: &AlertPayload) -> Result<()>;
}

/// Build the HTTP client shared by all adapters
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("installs-sms-reminder/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Turn a non-success response into an error carrying status and body
pub(crate) async fn check_status(
    service: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow::anyhow!("{service} API error ({status}): {body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn SheetSource, _: &dyn MessageSender, _: &dyn AlertSink) {}

    #[test]
    fn test_display_value_lookup() {
        let row = RawRow {
            id: 1,
            filtered_out: false,
            cells: vec![
                RawCell {
                    column_id: 10,
                    display_value: Some("Mr John Doe".to_string()),
                },
                RawCell {
                    column_id: 11,
                    display_value: None,
                },
            ],
        };
        assert_eq!(row.display_value(10), Some("Mr John Doe"));
        assert_eq!(row.display_value(11), None);
        assert_eq!(row.display_value(12), None);
    }
}
