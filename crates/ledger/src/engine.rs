//! Ledger engine: one session's work-day collection and its state machine.
//!
//! The engine owns the collection in memory and writes it back as one blob
//! after every successful mutation, in the same discipline as the
//! credential store:
//!
//! ```text
//! validate → stage the mutated collection → persist → commit in memory
//! ```
//!
//! Destructive actions (mark-paid, soft-delete, purge) run through the
//! escalating confirmation protocol in [`crate::confirmation`]. Rejected
//! calls never touch the armed protocol; any other successful mutation
//! disarms it; a storage failure while committing disarms it and leaves
//! the collection as it was.

use chrono::NaiveDate;

use daybook_auth::Session;
use daybook_core::{DomainError, DomainResult, RecordId};
use daybook_store::{key, KeyValueStore};

use crate::confirmation::{ConfirmAction, Confirmation, PendingConfirmation};
use crate::record::{DayType, WorkDayRecord};
use crate::view::{DayTotals, SortOrder, View};

/// Work-day operations scoped to one session's storage namespace.
#[derive(Debug)]
pub struct LedgerEngine<S> {
    store: S,
    session: Session,
    key: String,
    records: Vec<WorkDayRecord>,
    pending: Option<PendingConfirmation>,
}

impl<S> LedgerEngine<S> {
    /// The session this engine is scoped to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The armed confirmation protocol, if any.
    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.pending
    }

    /// Disarm any pending confirmation. Idempotent.
    pub fn cancel_confirmation(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("cancelled pending confirmation");
        }
    }

    /// End the engine, handing the store back.
    pub fn close(self) -> S {
        tracing::debug!("closed ledger for {}", self.session.username());
        self.store
    }
}

impl<S> LedgerEngine<S>
where
    S: KeyValueStore,
{
    /// Open the ledger for a session, loading its persisted collection.
    pub fn open(store: S, session: Session) -> DomainResult<Self> {
        let key = key::work_days_key(session.username());
        let records = match store.get(&key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| DomainError::storage(format!("decode work days: {e}")))?,
            None => Vec::new(),
        };

        tracing::debug!(
            "opened ledger for {} ({} records)",
            session.username(),
            records.len()
        );
        Ok(Self {
            store,
            session,
            key,
            records,
            pending: None,
        })
    }

    /// Append a new work day. Duplicate dates are allowed (split shifts).
    pub fn add_record(&mut self, date: &str, day_type: DayType) -> DomainResult<RecordId> {
        let date = parse_date(date)?;

        let record = WorkDayRecord::new(date, day_type);
        let id = record.id_typed();
        let mut staged = self.records.clone();
        staged.push(record);
        self.persist(&staged)?;
        self.records = staged;
        self.pending = None;

        tracing::info!("added {} work day on {}", day_type, date);
        Ok(id)
    }

    /// Change a record's date and day type in place.
    pub fn edit_record(&mut self, id: RecordId, date: &str, day_type: DayType) -> DomainResult<()> {
        let index = self.position(id)?;
        let date = parse_date(date)?;

        let mut staged = self.records.clone();
        staged[index].reschedule(date, day_type);
        self.persist(&staged)?;
        self.records = staged;
        self.pending = None;

        tracing::info!("rescheduled work day {} to {}", id, date);
        Ok(())
    }

    /// Two-phase paid transition: arm on the first call, commit on the
    /// immediately following call for the same record.
    pub fn mark_paid(&mut self, id: RecordId) -> DomainResult<Confirmation> {
        let index = self.position(id)?;
        let record = &self.records[index];
        if record.is_deleted() {
            tracing::warn!("rejected mark-paid for {}: record is deleted", id);
            return Err(DomainError::state("Work day is deleted"));
        }
        if record.is_paid() {
            tracing::warn!("rejected mark-paid for {}: already paid", id);
            return Err(DomainError::state("Work day is already paid"));
        }

        if let Some(progress) = self.advance_or_arm(ConfirmAction::MarkPaid, id, 1) {
            return Ok(progress);
        }

        self.pending = None;
        let mut staged = self.records.clone();
        staged[index].mark_paid();
        self.persist(&staged)?;
        self.records = staged;

        tracing::info!("marked work day {} paid", id);
        Ok(Confirmation::Committed)
    }

    /// Unconditional single step back to unpaid.
    pub fn mark_unpaid(&mut self, id: RecordId) -> DomainResult<()> {
        let index = self.position(id)?;

        let mut staged = self.records.clone();
        staged[index].mark_unpaid();
        self.persist(&staged)?;
        self.records = staged;
        self.pending = None;

        tracing::info!("marked work day {} unpaid", id);
        Ok(())
    }

    /// Soft-delete behind an escalating confirmation. The number of
    /// confirming calls is fixed by the record's paid status at the arming
    /// call: one for unpaid records, two for paid ones.
    pub fn soft_delete(&mut self, id: RecordId) -> DomainResult<Confirmation> {
        let index = self.position(id)?;
        let record = &self.records[index];
        if record.is_deleted() {
            tracing::warn!("rejected soft-delete for {}: already deleted", id);
            return Err(DomainError::state("Work day is already deleted"));
        }

        let required = if record.is_paid() { 2 } else { 1 };
        if let Some(progress) = self.advance_or_arm(ConfirmAction::SoftDelete, id, required) {
            return Ok(progress);
        }

        self.pending = None;
        let mut staged = self.records.clone();
        staged[index].soft_delete();
        self.persist(&staged)?;
        self.records = staged;

        tracing::info!("soft-deleted work day {}", id);
        Ok(Confirmation::Committed)
    }

    /// Unconditional single step out of the deleted state.
    pub fn restore(&mut self, id: RecordId) -> DomainResult<()> {
        let index = self.position(id)?;

        let mut staged = self.records.clone();
        staged[index].restore();
        self.persist(&staged)?;
        self.records = staged;
        self.pending = None;

        tracing::info!("restored work day {}", id);
        Ok(())
    }

    /// Physically remove a soft-deleted record, behind three confirming
    /// calls after the arming one. Irreversible.
    pub fn purge(&mut self, id: RecordId) -> DomainResult<Confirmation> {
        let index = self.position(id)?;
        if !self.records[index].is_deleted() {
            tracing::warn!("rejected purge for {}: record is not deleted", id);
            return Err(DomainError::state("Work day is not deleted"));
        }

        if let Some(progress) = self.advance_or_arm(ConfirmAction::Purge, id, 3) {
            return Ok(progress);
        }

        self.pending = None;
        let mut staged = self.records.clone();
        staged.remove(index);
        self.persist(&staged)?;
        self.records = staged;

        tracing::info!("purged work day {}", id);
        Ok(Confirmation::Committed)
    }

    /// Records matching a view, date-ordered. The sort is stable, so
    /// same-date records keep their insertion order under either order.
    pub fn list_by_view(&self, view: View, order: SortOrder) -> Vec<WorkDayRecord> {
        let mut records: Vec<WorkDayRecord> = self
            .records
            .iter()
            .filter(|record| view.matches(record))
            .cloned()
            .collect();
        match order {
            SortOrder::Asc => records.sort_by(|a, b| a.date().cmp(&b.date())),
            SortOrder::Desc => records.sort_by(|a, b| b.date().cmp(&a.date())),
        }
        records
    }

    /// Day-type-weighted sums over the whole collection.
    pub fn totals(&self) -> DayTotals {
        DayTotals::of(&self.records)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    /// Run the confirmation protocol for one call. Returns the progress to
    /// report, or `None` when the caller should commit.
    fn advance_or_arm(
        &mut self,
        action: ConfirmAction,
        id: RecordId,
        required: u8,
    ) -> Option<Confirmation> {
        match &mut self.pending {
            Some(pending) if pending.targets(action, id) => {
                if pending.is_complete() {
                    return None;
                }
                pending.advance();
                Some(pending.progress())
            }
            _ => {
                let armed = PendingConfirmation::arm(action, id, required);
                tracing::debug!("armed {} confirmation for {}", action, id);
                self.pending = Some(armed);
                Some(armed.progress())
            }
        }
    }

    fn position(&self, id: RecordId) -> DomainResult<usize> {
        self.records
            .iter()
            .position(|record| record.id_typed() == id)
            .ok_or_else(|| DomainError::not_found("Work day not found"))
    }

    fn persist(&self, records: &[WorkDayRecord]) -> DomainResult<()> {
        let encoded = serde_json::to_string(records)
            .map_err(|e| DomainError::storage(format!("encode work days: {e}")))?;
        self.store.set(&self.key, encoded)?;
        Ok(())
    }
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    if raw.is_empty() {
        return Err(DomainError::validation("Date is required"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::validation("Invalid date"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
