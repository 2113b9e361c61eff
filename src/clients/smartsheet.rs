//! Smartsheet REST adapter
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Fall back to the raw cell value when no display value is present
//! - 1.0.0: Filters, columns, filtered rows, search and checkbox updates

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    check_status, ColumnDescriptor, ColumnId, FilterDescriptor, FilterId, RawCell, RawRow, RowId,
    SheetSource,
};

/// Client bound to a single sheet
#[derive(Clone)]
pub struct SmartsheetClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    sheet_id: u64,
}

#[derive(Debug, Deserialize)]
struct IndexResult<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct FilterRecord {
    id: u64,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ColumnRecord {
    id: u64,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SheetRecord {
    #[serde(default)]
    rows: Vec<RowRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowRecord {
    id: u64,
    #[serde(default)]
    filtered_out: bool,
    #[serde(default)]
    cells: Vec<CellRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellRecord {
    column_id: u64,
    #[serde(default)]
    display_value: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRecord {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    object_id: u64,
    #[serde(default)]
    object_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RowUpdate {
    id: u64,
    cells: Vec<CellUpdate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CellUpdate {
    column_id: u64,
    value: bool,
    strict: bool,
}

impl From<CellRecord> for RawCell {
    fn from(cell: CellRecord) -> Self {
        let display_value = cell.display_value.or_else(|| match cell.value {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        });
        RawCell {
            column_id: cell.column_id,
            display_value,
        }
    }
}

impl From<RowRecord> for RawRow {
    fn from(row: RowRecord) -> Self {
        RawRow {
            id: row.id,
            filtered_out: row.filtered_out,
            cells: row.cells.into_iter().map(RawCell::from).collect(),
        }
    }
}

fn row_hits(search: SearchRecord) -> Vec<RowId> {
    let mut rows: Vec<RowId> = Vec::new();
    for hit in search.results {
        if hit.object_type.as_deref() != Some("row") {
            continue;
        }
        if !rows.contains(&hit.object_id) {
            rows.push(hit.object_id);
        }
    }
    rows
}

impl SmartsheetClient {
    pub fn new(http: reqwest::Client, base_url: &str, token: String, sheet_id: u64) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            sheet_id,
        }
    }

    pub fn sheet_id(&self) -> u64 {
        self.sheet_id
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Smartsheet GET {url}");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;
        let response = check_status("Smartsheet", response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SheetSource for SmartsheetClient {
    async fn list_filters(&self) -> Result<Vec<FilterDescriptor>> {
        let path = format!("/sheets/{}/filters", self.sheet_id);
        let index: IndexResult<FilterRecord> =
            self.get(&path, &[("includeAll", "true".to_string())]).await?;
        Ok(index
            .data
            .into_iter()
            .map(|f| FilterDescriptor {
                id: f.id,
                name: f.name.unwrap_or_default(),
            })
            .collect())
    }

    async fn list_columns(&self) -> Result<Vec<ColumnDescriptor>> {
        let path = format!("/sheets/{}/columns", self.sheet_id);
        let index: IndexResult<ColumnRecord> =
            self.get(&path, &[("includeAll", "true".to_string())]).await?;
        Ok(index
            .data
            .into_iter()
            .map(|c| ColumnDescriptor {
                id: c.id,
                title: c.title.unwrap_or_default(),
            })
            .collect())
    }

    async fn filtered_rows(&self, filter_id: FilterId) -> Result<Vec<RawRow>> {
        let path = format!("/sheets/{}", self.sheet_id);
        let sheet: SheetRecord = self
            .get(&path, &[("filterId", filter_id.to_string())])
            .await?;
        Ok(sheet.rows.into_iter().map(RawRow::from).collect())
    }

    async fn search_exact(&self, text: &str) -> Result<Vec<RowId>> {
        let path = format!("/search/sheets/{}", self.sheet_id);
        let search: SearchRecord = self.get(&path, &[("query", text.to_string())]).await?;
        Ok(row_hits(search))
    }

    async fn set_checkbox(&self, row_id: RowId, column_id: ColumnId, value: bool) -> Result<()> {
        let url = format!("{}/sheets/{}/rows", self.base_url, self.sheet_id);
        let body = vec![RowUpdate {
            id: row_id,
            cells: vec![CellUpdate {
                column_id,
                value,
                strict: false,
            }],
        }];
        debug!("Smartsheet PUT {url} row {row_id} column {column_id}");
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check_status("Smartsheet", response).await?;
        Ok(())
    }
}
