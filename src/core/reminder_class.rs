//! Reminder lead-time classes
//!
//! Each class is bound to one named sheet filter and one "reminder sent" column.

use serde::{Deserialize, Serialize};

use super::error::InvalidReminderClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderClass {
    /// Reminder sent a day before the installation
    TwentyFourHour,
    /// Reminder sent three days before the installation
    SeventyTwoHour,
}

impl ReminderClass {
    /// Fixed processing order for a run
    pub const RUN_ORDER: [ReminderClass; 2] =
        [ReminderClass::SeventyTwoHour, ReminderClass::TwentyFourHour];

    pub fn hours(self) -> u32 {
        match self {
            ReminderClass::TwentyFourHour => 24,
            ReminderClass::SeventyTwoHour => 72,
        }
    }

    /// Name of the sheet filter selecting rows due for this reminder
    pub fn filter_name(self) -> &'static str {
        match self {
            ReminderClass::TwentyFourHour => "24_hours_reminder",
            ReminderClass::SeventyTwoHour => "72_hours_reminder",
        }
    }

    /// Title of the checkbox column recording that this reminder went out
    pub fn sent_column_title(self) -> &'static str {
        match self {
            ReminderClass::TwentyFourHour => "24 hours reminder sent",
            ReminderClass::SeventyTwoHour => "72 hours reminder sent",
        }
    }

    pub fn from_hours(hours: u32) -> Result<Self, InvalidReminderClass> {
        match hours {
            24 => Ok(ReminderClass::TwentyFourHour),
            72 => Ok(ReminderClass::SeventyTwoHour),
            other => Err(InvalidReminderClass(other.to_string())),
        }
    }

    /// Parse a comma separated list such as `"72,24"`, always returned in run order
    pub fn parse_list(list: &str) -> Result<Vec<Self>, InvalidReminderClass> {
        let mut selected = Vec::new();
        for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let class: ReminderClass = part.parse()?;
            if !selected.contains(&class) {
                selected.push(class);
            }
        }
        if selected.is_empty() {
            return Err(InvalidReminderClass(list.to_string()));
        }
        Ok(Self::RUN_ORDER
            .into_iter()
            .filter(|c| selected.contains(c))
            .collect())
    }
}

impl std::fmt::Display for ReminderClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

impl std::str::FromStr for ReminderClass {
    type Err = InvalidReminderClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed.strip_suffix('h').unwrap_or(&trimmed);
        digits
            .parse::<u32>()
            .map_err(|_| InvalidReminderClass(s.to_string()))
            .and_then(Self::from_hours)
            .map_err(|_| InvalidReminderClass(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ReminderClass::TwentyFourHour.to_string(), "24h");
        assert_eq!(ReminderClass::SeventyTwoHour.to_string(), "72h");
    }

    #[test]
    fn test_parse() {
        assert_eq!("24".parse::<ReminderClass>().unwrap(), ReminderClass::TwentyFourHour);
        assert_eq!("72H".parse::<ReminderClass>().unwrap(), ReminderClass::SeventyTwoHour);
        assert_eq!(
            "48".parse::<ReminderClass>(),
            Err(InvalidReminderClass("48".to_string()))
        );
        assert!("soon".parse::<ReminderClass>().is_err());
    }

    #[test]
    fn test_parse_list_keeps_run_order() {
        assert_eq!(
            ReminderClass::parse_list("24, 72").unwrap(),
            vec![ReminderClass::SeventyTwoHour, ReminderClass::TwentyFourHour]
        );
        assert_eq!(
            ReminderClass::parse_list("24,24").unwrap(),
            vec![ReminderClass::TwentyFourHour]
        );
        assert!(ReminderClass::parse_list(" , ").is_err());
        assert!(ReminderClass::parse_list("72,12").is_err());
    }

    #[test]
    fn test_each_class_has_distinct_sheet_names() {
        let [a, b] = ReminderClass::RUN_ORDER;
        assert_ne!(a.filter_name(), b.filter_name());
        assert_ne!(a.sent_column_title(), b.sent_column_title());
    }
}
