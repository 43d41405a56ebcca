//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The `Display` output of every variant is the user-facing message itself;
/// callers surface it verbatim. Keep messages self-contained and free of
/// internal jargon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed a format or presence rule (e.g. malformed PIN).
    #[error("{0}")]
    Validation(String),

    /// Authentication failed (bad credentials, no active session).
    #[error("{0}")]
    Auth(String),

    /// A referenced record or account does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The operation is not legal in the record's current lifecycle state.
    #[error("{0}")]
    State(String),

    /// The persistence substrate failed; in-memory state was left untouched.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
