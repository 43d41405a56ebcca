//! Key-value store boundary.
//!
//! This module defines the persistence abstraction both domain components
//! sit on, without making any storage assumptions.

use std::sync::Arc;

use thiserror::Error;

use daybook_core::DomainError;

/// Key-value store operation error.
///
/// These are **infrastructure errors** (medium, locking, document encoding)
/// as opposed to domain errors (validation, lifecycle state). Domain
/// services convert them via `DomainError::from`, which collapses every
/// variant into `DomainError::Storage`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("io failure: {0}")]
    Io(String),

    /// The store's in-process lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    Lock(String),

    /// The persisted document could not be encoded or decoded.
    #[error("corrupt store document: {0}")]
    Corrupt(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::storage(err.to_string())
    }
}

/// Flat string-to-string key-value store.
///
/// The `KeyValueStore` is the **persistence layer** for the whole system:
/// accounts, the session pointer, the remembered username and each
/// account's work-day collection all live here, one text blob per key.
///
/// ## Design Principles
///
/// - **No storage assumptions**: works with an in-memory implementation
///   (tests/dev) and a file-backed one (persistent hosts)
/// - **Whole-value semantics**: a key's value is read and written as one
///   blob; there are no partial updates, so a `set` either lands the whole
///   new value or fails leaving the old one
/// - **Opaque values**: the store never inspects a value; owning components
///   encode and decode their own collections (JSON)
///
/// ## Namespacing
///
/// Isolation between accounts is by key convention, not by the store:
/// ledger data lives under `<username>_work-days` (see [`crate::key`]),
/// so two accounts sharing one substrate never read each other's records.
///
/// ## Error Semantics
///
/// Every operation reports failures; callers rely on a failed `set`
/// having left the previous value in place, and sequence their own
/// in-memory commit after the write succeeds.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove the value stored under `key`; absent keys are not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
