//! Account record: username plus current credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use daybook_core::Entity;

use crate::credential::Credential;

/// A device-local account.
///
/// The username doubles as the account identifier and as the storage
/// namespace prefix for the account's ledger data.
///
/// # Invariants
/// - Exactly one account per username (enforced by the map keyed on it).
/// - The credential always satisfies its mode's format rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    username: String,
    credential: Credential,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(username: impl Into<String>, credential: Credential) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            credential,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the credential, stamping `updated_at`.
    pub fn rotate_credential(&mut self, credential: Credential) {
        self.credential = credential;
        self.updated_at = Utc::now();
    }
}

impl Entity for Account {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.username
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
