//! Escalating confirmation protocol for destructive actions.
//!
//! At most one protocol is armed at a time. Arming freezes the number of
//! required confirming calls; repeating the same action on the same record
//! advances the counter and finally commits. Cancelling, or successfully
//! completing any other mutation, disarms it. The state is transient and
//! never persisted, so a restart always comes up disarmed.

use daybook_core::RecordId;

/// Action families that demand confirmation before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    MarkPaid,
    SoftDelete,
    Purge,
}

impl core::fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfirmAction::MarkPaid => write!(f, "mark-paid"),
            ConfirmAction::SoftDelete => write!(f, "soft-delete"),
            ConfirmAction::Purge => write!(f, "purge"),
        }
    }
}

/// The armed protocol: which action, on which record, how far along.
///
/// `required` is fixed at arm time; `step` runs from 1 up to it. The
/// commit happens on the call made once `step` already equals `required`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConfirmation {
    action: ConfirmAction,
    record: RecordId,
    step: u8,
    required: u8,
}

impl PendingConfirmation {
    pub(crate) fn arm(action: ConfirmAction, record: RecordId, required: u8) -> Self {
        Self {
            action,
            record,
            step: 1,
            required,
        }
    }

    pub fn action(&self) -> ConfirmAction {
        self.action
    }

    pub fn record(&self) -> RecordId {
        self.record
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn required(&self) -> u8 {
        self.required
    }

    pub(crate) fn targets(&self, action: ConfirmAction, record: RecordId) -> bool {
        self.action == action && self.record == record
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.step >= self.required
    }

    pub(crate) fn advance(&mut self) {
        self.step += 1;
    }

    pub(crate) fn progress(&self) -> Confirmation {
        Confirmation::Pending {
            step: self.step,
            required: self.required,
        }
    }
}

/// What a confirmable operation reports back to the caller.
///
/// `Pending` carries enough for escalating button labels; `Committed`
/// means the state change was applied and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Pending { step: u8, required: u8 },
    Committed,
}

impl Confirmation {
    pub fn is_committed(&self) -> bool {
        matches!(self, Confirmation::Committed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_starts_at_step_one() {
        let pending = PendingConfirmation::arm(ConfirmAction::Purge, RecordId::new(), 3);
        assert_eq!(pending.step(), 1);
        assert_eq!(pending.required(), 3);
        assert!(!pending.is_complete());
    }

    #[test]
    fn advances_to_completion() {
        let mut pending = PendingConfirmation::arm(ConfirmAction::Purge, RecordId::new(), 3);
        pending.advance();
        assert_eq!(pending.step(), 2);
        assert!(!pending.is_complete());

        pending.advance();
        assert_eq!(pending.step(), 3);
        assert!(pending.is_complete());
    }

    #[test]
    fn single_confirmation_protocol_completes_immediately() {
        let pending = PendingConfirmation::arm(ConfirmAction::MarkPaid, RecordId::new(), 1);
        assert!(pending.is_complete());
    }

    #[test]
    fn targets_requires_both_action_and_record_to_match() {
        let record = RecordId::new();
        let pending = PendingConfirmation::arm(ConfirmAction::SoftDelete, record, 2);

        assert!(pending.targets(ConfirmAction::SoftDelete, record));
        assert!(!pending.targets(ConfirmAction::Purge, record));
        assert!(!pending.targets(ConfirmAction::SoftDelete, RecordId::new()));
    }
}
