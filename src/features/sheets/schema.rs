//! Sheet shape resolution
//!
//! Resolves the two reminder filters and the four columns the run depends on.
//! Every identifier must resolve before anything is sent.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::{debug, info};

use crate::clients::{ColumnDescriptor, ColumnId, FilterId, SheetSource};
use crate::core::{ReminderClass, SchemaError};

pub const NAME_COLUMN_TITLE: &str = "End User";
pub const PHONE_COLUMN_TITLE: &str = "Telephone Number";

/// Filter id per reminder class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMap {
    pub twenty_four_hour: FilterId,
    pub seventy_two_hour: FilterId,
}

impl FilterMap {
    pub fn get(&self, class: ReminderClass) -> FilterId {
        match class {
            ReminderClass::TwentyFourHour => self.twenty_four_hour,
            ReminderClass::SeventyTwoHour => self.seventy_two_hour,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetColumnMap {
    pub name: ColumnId,
    pub phone: ColumnId,
    pub sent_twenty_four_hour: ColumnId,
    pub sent_seventy_two_hour: ColumnId,
}

impl SheetColumnMap {
    /// Checkbox column recording that `class` was sent
    pub fn sent(&self, class: ReminderClass) -> ColumnId {
        match class {
            ReminderClass::TwentyFourHour => self.sent_twenty_four_hour,
            ReminderClass::SeventyTwoHour => self.sent_seventy_two_hour,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSchema {
    pub filters: FilterMap,
    pub columns: SheetColumnMap,
}

fn find_column(columns: &[ColumnDescriptor], title: &str) -> Option<ColumnId> {
    columns.iter().find(|c| c.title == title).map(|c| c.id)
}

impl SheetSchema {
    /// Resolve filters then columns from the current sheet state
    pub async fn resolve(sheet: &dyn SheetSource) -> Result<Self, SchemaError> {
        let filters = sheet.list_filters().await?;
        debug!("Sheet defines {} filters", filters.len());

        let filter_id = |class: ReminderClass| {
            filters
                .iter()
                .find(|f| f.name == class.filter_name())
                .map(|f| f.id)
                .ok_or_else(|| SchemaError::FilterNotFound(class.filter_name().to_string()))
        };
        let filters = FilterMap {
            twenty_four_hour: filter_id(ReminderClass::TwentyFourHour)?,
            seventy_two_hour: filter_id(ReminderClass::SeventyTwoHour)?,
        };

        let columns = sheet.list_columns().await?;
        let column_id = |title: &str| {
            find_column(&columns, title).ok_or_else(|| SchemaError::ColumnNotFound(title.to_string()))
        };
        let columns = SheetColumnMap {
            name: column_id(NAME_COLUMN_TITLE)?,
            phone: column_id(PHONE_COLUMN_TITLE)?,
            sent_twenty_four_hour: column_id(ReminderClass::TwentyFourHour.sent_column_title())?,
            sent_seventy_two_hour: column_id(ReminderClass::SeventyTwoHour.sent_column_title())?,
        };

        info!("Resolved sheet schema: {filters:?}, {columns:?}");
        Ok(SheetSchema { filters, columns })
    }

    /// Column id for `title`, `None` when the sheet has no such column
    pub async fn column_id_by_title(sheet: &dyn SheetSource, title: &str) -> Result<Option<ColumnId>> {
        let columns = sheet.list_columns().await?;
        Ok(find_column(&columns, title))
    }

    /// Every title the run requires
    pub fn required_column_titles() -> [&'static str; 4] {
        [
            NAME_COLUMN_TITLE,
            PHONE_COLUMN_TITLE,
            ReminderClass::TwentyFourHour.sent_column_title(),
            ReminderClass::SeventyTwoHour.sent_column_title(),
        ]
    }
}
