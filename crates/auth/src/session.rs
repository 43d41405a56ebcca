//! Session value object: the active account pointer.

use serde::{Deserialize, Serialize};

use daybook_core::ValueObject;

/// The active session, naming the account whose namespace is open.
///
/// A session is a weak reference: it looks the account up by username and
/// owns nothing. At most one session is active per process at a time;
/// login and signup replace it, logout destroys it. The persisted form is
/// the bare username string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl ValueObject for Session {}
