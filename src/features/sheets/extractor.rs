//! Recipient extraction
//!
//! Pulls the rows selected by a reminder filter and splits them into
//! validated recipients and the raw numbers that failed validation.
//! Read-only with respect to the sheet.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: A repeated invalid value is reported once
//! - 1.1.0: Rows with no phone cell land in the invalid batch instead of being dropped
//! - 1.0.0: Initial release

use anyhow::Result;
use log::{error, info};
use serde::Serialize;
use std::collections::HashMap;

use super::schema::SheetColumnMap;
use crate::clients::{FilterId, SheetSource};
use crate::features::phone::{PhoneNumberNormalizer, E164};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub phone: E164,
    pub name: Option<String>,
}

/// Distinct raw phone values that failed validation in one extraction, first-seen order
pub type InvalidNumberBatch = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Unique by phone, in order of first appearance
    pub recipients: Vec<Recipient>,
    pub invalid: InvalidNumberBatch,
    /// Rows that passed the filter
    pub rows_processed: usize,
}

pub struct RecipientExtractor {
    normalizer: PhoneNumberNormalizer,
}

impl RecipientExtractor {
    pub fn new(normalizer: PhoneNumberNormalizer) -> Self {
        Self { normalizer }
    }

    pub async fn extract(
        &self,
        sheet: &dyn SheetSource,
        filter_id: FilterId,
        columns: &SheetColumnMap,
    ) -> Result<Extraction> {
        let rows = sheet.filtered_rows(filter_id).await?;
        let mut extraction = Extraction::default();
        let mut positions: HashMap<E164, usize> = HashMap::new();

        for row in rows.iter().filter(|r| !r.filtered_out) {
            extraction.rows_processed += 1;
            let name = row.display_value(columns.name).map(str::to_string);
            let raw_phone = row.display_value(columns.phone).unwrap_or_default();

            match self.normalizer.normalize(raw_phone) {
                Ok(phone) => match positions.get(&phone) {
                    // Duplicate number in the sheet: later row's name wins
                    Some(&index) => extraction.recipients[index].name = name,
                    None => {
                        positions.insert(phone.clone(), extraction.recipients.len());
                        extraction.recipients.push(Recipient { phone, name });
                    }
                },
                Err(invalid) => {
                    if !extraction.invalid.contains(&invalid.raw) {
                        extraction.invalid.push(invalid.raw);
                    }
                }
            }
        }

        info!(
            "Filter {}: {} rows passed filter, {} recipients, {} invalid numbers",
            filter_id,
            extraction.rows_processed,
            extraction.recipients.len(),
            extraction.invalid.len()
        );
        if !extraction.invalid.is_empty() {
            error!(
                "{} invalid phone numbers. These are: {:?}",
                extraction.invalid.len(),
                extraction.invalid
            );
        }

        Ok(extraction)
    }
}
