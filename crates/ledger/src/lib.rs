//! `daybook-ledger` — the work-day collection and its state machine.
//!
//! Records move between the unpaid, history and deleted views through
//! paid/unpaid, soft-delete/restore and purge transitions; the destructive
//! ones sit behind an escalating confirmation protocol. Everything is
//! driven through [`LedgerEngine`], scoped to one session's namespace.

pub mod confirmation;
pub mod engine;
pub mod record;
pub mod view;

pub use confirmation::{ConfirmAction, Confirmation, PendingConfirmation};
pub use engine::LedgerEngine;
pub use record::{DayType, Lifecycle, WorkDayRecord};
pub use view::{DayTotals, SortOrder, View};
