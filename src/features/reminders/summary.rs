//! Per-recipient outcomes and run totals

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::ReminderClass;
use crate::features::sheets::Recipient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkStatus {
    /// Send failed, so the sheet was left alone
    NotAttempted,
    Marked { rows: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub recipient: Recipient,
    pub class: ReminderClass,
    pub send_succeeded: bool,
    pub provider_id: Option<String>,
    pub send_error: Option<String>,
    pub mark: MarkStatus,
}

impl DeliveryOutcome {
    pub fn mark_failed(&self) -> bool {
        matches!(self.mark, MarkStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    pub class: ReminderClass,
    pub sent: usize,
    pub send_failed: usize,
    pub mark_failed: usize,
    pub invalid_numbers: usize,
    /// Set when the filtered rows could not be fetched
    pub extraction_error: Option<String>,
    pub cancelled: bool,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl ClassSummary {
    pub fn new(class: ReminderClass) -> Self {
        Self {
            class,
            sent: 0,
            send_failed: 0,
            mark_failed: 0,
            invalid_numbers: 0,
            extraction_error: None,
            cancelled: false,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: DeliveryOutcome) {
        if outcome.send_succeeded {
            self.sent += 1;
        } else {
            self.send_failed += 1;
        }
        if outcome.mark_failed() {
            self.mark_failed += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn is_clean(&self) -> bool {
        self.send_failed == 0 && self.mark_failed == 0 && self.extraction_error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub classes: Vec<ClassSummary>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            classes: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn class(&self, class: ReminderClass) -> Option<&ClassSummary> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn is_clean(&self) -> bool {
        self.classes.iter().all(ClassSummary::is_clean)
    }

    pub fn cancelled(&self) -> bool {
        self.classes.iter().any(|c| c.cancelled)
    }

    /// Outcomes an operator has to reconcile by hand before the next run
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.classes
            .iter()
            .flat_map(|c| c.outcomes.iter())
            .filter(|o| !o.send_succeeded || o.mark_failed())
    }
}
