use serde::{Deserialize, Serialize};

use crate::record::{Lifecycle, WorkDayRecord};

/// The three working views over the collection.
///
/// `Unpaid` and `History` partition the live records by paid status;
/// `Deleted` shows soft-deleted records regardless of whether they were
/// paid when deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Unpaid,
    History,
    Deleted,
}

impl View {
    pub fn matches(self, record: &WorkDayRecord) -> bool {
        match self {
            View::Unpaid => record.lifecycle() == Lifecycle::Unpaid,
            View::History => record.lifecycle() == Lifecycle::Paid,
            View::Deleted => record.lifecycle() == Lifecycle::Deleted,
        }
    }
}

impl core::fmt::Display for View {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            View::Unpaid => write!(f, "unpaid"),
            View::History => write!(f, "history"),
            View::Deleted => write!(f, "deleted"),
        }
    }
}

/// Date ordering for view queries. Ties keep insertion order either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Day-type-weighted sums per view.
///
/// Full days count 1.0 and half days 0.5, so every sum is an exact
/// multiple of 0.5. `total_days` covers the live records only; deleted
/// days are tracked separately and never feed the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    pub unpaid_days: f64,
    pub paid_days: f64,
    pub deleted_days: f64,
    pub total_days: f64,
}

impl DayTotals {
    /// Fold a whole collection into its per-view sums.
    pub fn of(records: &[WorkDayRecord]) -> Self {
        let mut unpaid_days = 0.0;
        let mut paid_days = 0.0;
        let mut deleted_days = 0.0;

        for record in records {
            let weight = record.day_type().weight();
            match record.lifecycle() {
                Lifecycle::Unpaid => unpaid_days += weight,
                Lifecycle::Paid => paid_days += weight,
                Lifecycle::Deleted => deleted_days += weight,
            }
        }

        Self {
            unpaid_days,
            paid_days,
            deleted_days,
            total_days: unpaid_days + paid_days,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DayType;
    use chrono::NaiveDate;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn views_partition_live_records_by_paid_status() {
        let unpaid = WorkDayRecord::new(test_date(), DayType::Full);
        let mut paid = WorkDayRecord::new(test_date(), DayType::Full);
        paid.mark_paid();
        let mut deleted_paid = WorkDayRecord::new(test_date(), DayType::Full);
        deleted_paid.mark_paid();
        deleted_paid.soft_delete();

        assert!(View::Unpaid.matches(&unpaid));
        assert!(!View::History.matches(&unpaid));

        assert!(View::History.matches(&paid));
        assert!(!View::Unpaid.matches(&paid));

        // Deleted wins over paid.
        assert!(View::Deleted.matches(&deleted_paid));
        assert!(!View::History.matches(&deleted_paid));
    }

    #[test]
    fn totals_exclude_deleted_from_the_total() {
        let mut records = vec![
            WorkDayRecord::new(test_date(), DayType::Full),
            WorkDayRecord::new(test_date(), DayType::Half),
            WorkDayRecord::new(test_date(), DayType::Full),
        ];
        records[1].mark_paid();
        records[2].soft_delete();

        let totals = DayTotals::of(&records);
        assert_eq!(totals.unpaid_days, 1.0);
        assert_eq!(totals.paid_days, 0.5);
        assert_eq!(totals.deleted_days, 1.0);
        assert_eq!(totals.total_days, 1.5);
    }

    #[test]
    fn totals_of_empty_collection_are_zero() {
        let totals = DayTotals::of(&[]);
        assert_eq!(totals.unpaid_days, 0.0);
        assert_eq!(totals.paid_days, 0.0);
        assert_eq!(totals.deleted_days, 0.0);
        assert_eq!(totals.total_days, 0.0);
    }

    #[test]
    fn view_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&View::History).unwrap(), "\"history\"");
        assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"desc\"");
    }
}
