//! Delivery state recording
//!
//! Flags the "reminder sent" checkbox on every row holding a number. Setting
//! an already-ticked box again changes nothing, so marks can be repeated.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Keep marking the remaining rows when one update fails
//! - 1.0.0: Initial release

use log::{debug, warn};

use super::schema::SheetColumnMap;
use crate::clients::SheetSource;
use crate::core::{MarkError, ReminderClass};
use crate::features::phone::PhoneNumberNormalizer;

pub struct DeliveryStateRecorder {
    normalizer: PhoneNumberNormalizer,
}

impl DeliveryStateRecorder {
    pub fn new(normalizer: PhoneNumberNormalizer) -> Self {
        Self { normalizer }
    }

    /// Tick `class`'s sent column on every row matching `phone`.
    ///
    /// Returns the number of rows marked.
    pub async fn mark_sent(
        &self,
        sheet: &dyn SheetSource,
        columns: &SheetColumnMap,
        phone: &str,
        class: ReminderClass,
    ) -> Result<usize, MarkError> {
        // Callers pass validated numbers, re-checked here regardless
        let search_key = self.normalizer.national_search_key(phone)?;
        let column_id = columns.sent(class);

        let row_ids = sheet.search_exact(&search_key).await?;
        if row_ids.is_empty() {
            return Err(MarkError::NumberNotFound(phone.to_string()));
        }
        debug!("{} rows match {} ({})", row_ids.len(), phone, search_key);

        let total = row_ids.len();
        let mut marked = 0;
        let mut last_failure = None;
        for row_id in row_ids {
            match sheet.set_checkbox(row_id, column_id, true).await {
                Ok(()) => marked += 1,
                Err(e) => {
                    warn!("Failed to mark row {row_id} for {phone} ({class}): {e:#}");
                    last_failure = Some(e);
                }
            }
        }

        match last_failure {
            None => Ok(marked),
            Some(e) if marked == 0 => Err(MarkError::Source(e)),
            Some(e) => Err(MarkError::PartialUpdate {
                marked,
                total,
                reason: format!("{e:#}"),
            }),
        }
    }
}
