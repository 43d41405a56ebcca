use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use daybook_core::{Entity, RecordId};

/// How much of a day was worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Full,
    Half,
}

impl DayType {
    /// Contribution of this day type to aggregate totals.
    pub fn weight(self) -> f64 {
        match self {
            DayType::Full => 1.0,
            DayType::Half => 0.5,
        }
    }
}

impl core::fmt::Display for DayType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DayType::Full => write!(f, "full"),
            DayType::Half => write!(f, "half"),
        }
    }
}

/// Lifecycle derived from the `paid`/`deleted` flags.
///
/// A record is in exactly one state at a time: soft-deleted records stay
/// `Deleted` whether or not they were paid, since deletion removes them
/// from the working views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Unpaid,
    Paid,
    Deleted,
}

/// One worked day in the ledger.
///
/// Duplicate dates are permitted (split shifts). Transitions mutate the
/// flags and their companion timestamps together; nothing else touches
/// `paid_date`/`deleted_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkDayRecord {
    id: RecordId,
    date: NaiveDate,
    day_type: DayType,
    paid: bool,
    paid_date: Option<DateTime<Utc>>,
    deleted: bool,
    deleted_date: Option<DateTime<Utc>>,
    added_on: DateTime<Utc>,
}

impl WorkDayRecord {
    /// New unpaid, not-deleted record stamped with the creation time.
    pub fn new(date: NaiveDate, day_type: DayType) -> Self {
        Self {
            id: RecordId::new(),
            date,
            day_type,
            paid: false,
            paid_date: None,
            deleted: false,
            deleted_date: None,
            added_on: Utc::now(),
        }
    }

    pub fn id_typed(&self) -> RecordId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_type(&self) -> DayType {
        self.day_type
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn paid_date(&self) -> Option<DateTime<Utc>> {
        self.paid_date
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn deleted_date(&self) -> Option<DateTime<Utc>> {
        self.deleted_date
    }

    pub fn added_on(&self) -> DateTime<Utc> {
        self.added_on
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.deleted {
            Lifecycle::Deleted
        } else if self.paid {
            Lifecycle::Paid
        } else {
            Lifecycle::Unpaid
        }
    }

    /// Change date and day type, leaving the lifecycle flags alone.
    pub fn reschedule(&mut self, date: NaiveDate, day_type: DayType) {
        self.date = date;
        self.day_type = day_type;
    }

    pub fn mark_paid(&mut self) {
        self.paid = true;
        self.paid_date = Some(Utc::now());
    }

    pub fn mark_unpaid(&mut self) {
        self.paid = false;
        self.paid_date = None;
    }

    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.deleted_date = Some(Utc::now());
    }

    /// Invariant: restore never alters the paid flag.
    pub fn restore(&mut self) {
        self.deleted = false;
        self.deleted_date = None;
    }
}

impl Entity for WorkDayRecord {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn new_record_starts_unpaid_and_not_deleted() {
        let record = WorkDayRecord::new(test_date(), DayType::Full);

        assert!(!record.is_paid());
        assert!(record.paid_date().is_none());
        assert!(!record.is_deleted());
        assert!(record.deleted_date().is_none());
        assert_eq!(record.lifecycle(), Lifecycle::Unpaid);
    }

    #[test]
    fn paid_transitions_stamp_and_clear_the_timestamp() {
        let mut record = WorkDayRecord::new(test_date(), DayType::Full);

        record.mark_paid();
        assert!(record.is_paid());
        assert!(record.paid_date().is_some());
        assert_eq!(record.lifecycle(), Lifecycle::Paid);

        record.mark_unpaid();
        assert!(!record.is_paid());
        assert!(record.paid_date().is_none());
        assert_eq!(record.lifecycle(), Lifecycle::Unpaid);
    }

    #[test]
    fn restore_preserves_the_paid_flag() {
        let mut record = WorkDayRecord::new(test_date(), DayType::Half);
        record.mark_paid();

        record.soft_delete();
        assert_eq!(record.lifecycle(), Lifecycle::Deleted);

        record.restore();
        assert!(record.is_paid());
        assert!(!record.is_deleted());
        assert!(record.deleted_date().is_none());
        assert_eq!(record.lifecycle(), Lifecycle::Paid);
    }

    #[test]
    fn reschedule_leaves_lifecycle_untouched() {
        let mut record = WorkDayRecord::new(test_date(), DayType::Full);
        record.mark_paid();
        let paid_date = record.paid_date();

        let moved = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        record.reschedule(moved, DayType::Half);

        assert_eq!(record.date(), moved);
        assert_eq!(record.day_type(), DayType::Half);
        assert!(record.is_paid());
        assert_eq!(record.paid_date(), paid_date);
    }

    #[test]
    fn day_type_weights() {
        assert_eq!(DayType::Full.weight(), 1.0);
        assert_eq!(DayType::Half.weight(), 0.5);
    }

    #[test]
    fn day_type_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&DayType::Full).unwrap(), "\"full\"");
        assert_eq!(serde_json::to_string(&DayType::Half).unwrap(), "\"half\"");
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = WorkDayRecord::new(test_date(), DayType::Half);
        record.mark_paid();

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: WorkDayRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
