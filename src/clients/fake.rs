//! In-memory collaborators for tests

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{
    AlertPayload, AlertSink, ColumnDescriptor, ColumnId, FilterDescriptor, FilterId,
    MessageSender, RawCell, RawRow, RowId, SendReceipt, SheetSource,
};

pub const FILTER_24: FilterId = 1;
pub const FILTER_72: FilterId = 2;
pub const NAME_COLUMN: ColumnId = 10;
pub const PHONE_COLUMN: ColumnId = 11;
pub const SENT_24_COLUMN: ColumnId = 12;
pub const SENT_72_COLUMN: ColumnId = 13;

/// Row with name and phone cells as the tracking sheet lays them out
pub fn contact_row(id: RowId, name: Option<&str>, phone: Option<&str>) -> RawRow {
    RawRow {
        id,
        filtered_out: false,
        cells: vec![
            RawCell {
                column_id: NAME_COLUMN,
                display_value: name.map(str::to_string),
            },
            RawCell {
                column_id: PHONE_COLUMN,
                display_value: phone.map(str::to_string),
            },
        ],
    }
}

#[derive(Default)]
pub struct FakeSheet {
    pub filters: Vec<FilterDescriptor>,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: HashMap<FilterId, Vec<RawRow>>,
    pub search_index: HashMap<String, Vec<RowId>>,
    pub fail_fetch: HashSet<FilterId>,
    pub fail_update: HashSet<RowId>,
    pub checkboxes: Mutex<HashMap<(RowId, ColumnId), bool>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSheet {
    /// Sheet with both reminder filters and all four required columns
    pub fn standard() -> Self {
        let filters = vec![
            FilterDescriptor {
                id: FILTER_24,
                name: "24_hours_reminder".to_string(),
            },
            FilterDescriptor {
                id: FILTER_72,
                name: "72_hours_reminder".to_string(),
            },
        ];
        let columns = [
            (NAME_COLUMN, "End User"),
            (PHONE_COLUMN, "Telephone Number"),
            (SENT_24_COLUMN, "24 hours reminder sent"),
            (SENT_72_COLUMN, "72 hours reminder sent"),
        ]
        .into_iter()
        .map(|(id, title)| ColumnDescriptor {
            id,
            title: title.to_string(),
        })
        .collect();

        Self {
            filters,
            columns,
            ..Default::default()
        }
    }

    pub fn with_rows(mut self, filter_id: FilterId, rows: Vec<RawRow>) -> Self {
        self.rows.insert(filter_id, rows);
        self
    }

    pub fn with_search(mut self, text: &str, row_ids: Vec<RowId>) -> Self {
        self.search_index.insert(text.to_string(), row_ids);
        self
    }

    pub fn checkbox(&self, row_id: RowId, column_id: ColumnId) -> Option<bool> {
        self.checkboxes
            .lock()
            .unwrap()
            .get(&(row_id, column_id))
            .copied()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SheetSource for FakeSheet {
    async fn list_filters(&self) -> Result<Vec<FilterDescriptor>> {
        self.record("list_filters".to_string());
        Ok(self.filters.clone())
    }

    async fn list_columns(&self) -> Result<Vec<ColumnDescriptor>> {
        self.record("list_columns".to_string());
        Ok(self.columns.clone())
    }

    async fn filtered_rows(&self, filter_id: FilterId) -> Result<Vec<RawRow>> {
        self.record(format!("filtered_rows {filter_id}"));
        if self.fail_fetch.contains(&filter_id) {
            return Err(anyhow::anyhow!("sheet unavailable"));
        }
        Ok(self.rows.get(&filter_id).cloned().unwrap_or_default())
    }

    async fn search_exact(&self, text: &str) -> Result<Vec<RowId>> {
        self.record(format!("search_exact {text}"));
        Ok(self.search_index.get(text).cloned().unwrap_or_default())
    }

    async fn set_checkbox(&self, row_id: RowId, column_id: ColumnId, value: bool) -> Result<()> {
        self.record(format!("set_checkbox {row_id} {column_id} {value}"));
        if self.fail_update.contains(&row_id) {
            return Err(anyhow::anyhow!("row {row_id} is locked"));
        }
        self.checkboxes
            .lock()
            .unwrap()
            .insert((row_id, column_id), value);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSender {
    pub fail_for: HashSet<String>,
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl FakeSender {
    pub fn failing_for(numbers: &[&str]) -> Self {
        Self {
            fail_for: numbers.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for FakeSender {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<SendReceipt> {
        if self.fail_for.contains(to) {
            return Err(anyhow::anyhow!("provider rejected {to}"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((from.to_string(), to.to_string(), body.to_string()));
        Ok(SendReceipt {
            provider_id: format!("SM{}", sent.len()),
        })
    }
}

#[derive(Default)]
pub struct FakeAlerts {
    pub fail: bool,
    pub raised: Mutex<Vec<AlertPayload>>,
}

impl FakeAlerts {
    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn raised(&self) -> Vec<AlertPayload> {
        self.raised.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for FakeAlerts {
    async fn raise_alert(&self, alert: &AlertPayload) -> Result<()> {
        self.raised.lock().unwrap().push(alert.clone());
        if self.fail {
            return Err(anyhow::anyhow!("alerting sink unreachable"));
        }
        Ok(())
    }
}
