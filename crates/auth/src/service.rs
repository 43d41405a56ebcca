//! Credential store service (application-level orchestration).
//!
//! Owns the account map and the session pointer. Every operation follows
//! the same write discipline:
//!
//! ```text
//! validate → stage the new state → persist → commit in memory
//! ```
//!
//! so a failed persistence write leaves both the in-memory session and the
//! stored documents exactly as they were. Error messages returned by the
//! operations are user-facing and surfaced verbatim by callers.

use std::collections::BTreeMap;

use daybook_core::{DomainError, DomainResult};
use daybook_store::{key, KeyValueStore};

use crate::account::Account;
use crate::credential::{Credential, CredentialMode};
use crate::session::Session;

/// Account and session operations over a key-value substrate.
///
/// Generic over the store so tests run on `MemoryStore` and hosts on
/// `FileStore`. The account map is read from storage on each operation;
/// only the session is held in memory.
#[derive(Debug)]
pub struct CredentialStore<S> {
    store: S,
    session: Option<Session>,
}

impl<S> CredentialStore<S> {
    /// The active session, if any.
    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> CredentialStore<S>
where
    S: KeyValueStore,
{
    /// Open the credential store, restoring a persisted session if one is
    /// present and still names an existing account. Stale or unreadable
    /// session pointers are discarded, not surfaced.
    pub fn open(store: S) -> DomainResult<Self> {
        let mut service = Self {
            store,
            session: None,
        };
        service.session = service.restore_session()?;
        Ok(service)
    }

    /// Create an account and log it in.
    ///
    /// Mode `none` overrides any supplied credential with the empty value
    /// and records the username for login-form auto-fill.
    pub fn signup(
        &mut self,
        username: &str,
        credential: &str,
        mode: CredentialMode,
    ) -> DomainResult<Session> {
        if username.is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if username.chars().count() < 3 {
            return Err(DomainError::validation(
                "Username must be at least 3 characters",
            ));
        }

        let credential = Credential::new(mode, credential)?;

        let mut accounts = self.load_accounts()?;
        if accounts.contains_key(username) {
            return Err(DomainError::validation("Username already exists"));
        }

        accounts.insert(username.to_string(), Account::new(username, credential));
        self.persist_accounts(&accounts)?;

        let session = self.establish_session(username)?;
        if mode == CredentialMode::None {
            self.remember_username(username)?;
        }

        tracing::info!("created account {} (mode {})", username, mode);
        Ok(session)
    }

    /// Authenticate and establish a session.
    ///
    /// The failure message never reveals whether the username exists.
    pub fn login(&mut self, username: &str, credential: &str) -> DomainResult<Session> {
        let accounts = self.load_accounts()?;
        let matched = accounts
            .get(username)
            .is_some_and(|account| account.credential().matches(credential));

        if !matched {
            tracing::warn!("failed login attempt for {}", username);
            return Err(DomainError::auth("Invalid username or password/PIN"));
        }

        let session = self.establish_session(username)?;
        tracing::info!("logged in {}", username);
        Ok(session)
    }

    /// Destroy the active session. Idempotent.
    pub fn logout(&mut self) -> DomainResult<()> {
        self.store.remove(key::CURRENT_USER)?;
        if let Some(session) = self.session.take() {
            tracing::info!("logged out {}", session.username());
        }
        Ok(())
    }

    /// Rotate the logged-in account's credential.
    ///
    /// The current credential must match unless the account is in mode
    /// `none` (which has nothing to present). The new credential is held to
    /// the same format rules as signup. Switching into `none` records the
    /// username for login-form auto-fill.
    pub fn change_credential(
        &mut self,
        current: &str,
        new_credential: &str,
        new_mode: CredentialMode,
    ) -> DomainResult<()> {
        let Some(session) = &self.session else {
            return Err(DomainError::auth("No user logged in"));
        };
        let username = session.username().to_string();

        let mut accounts = self.load_accounts()?;
        let account = accounts
            .get_mut(&username)
            .ok_or_else(|| DomainError::not_found("Account not found"))?;

        if account.credential().mode() != CredentialMode::None
            && !account.credential().matches(current)
        {
            return Err(DomainError::auth("Current password/PIN is incorrect"));
        }

        let credential = Credential::new(new_mode, new_credential)?;
        account.rotate_credential(credential);
        self.persist_accounts(&accounts)?;

        if new_mode == CredentialMode::None {
            self.remember_username(&username)?;
        }

        tracing::info!("rotated credential for {} (mode {})", username, new_mode);
        Ok(())
    }

    /// Credential mode of an account, if it exists. Lets the login form
    /// adapt to no-credential accounts without touching raw storage.
    pub fn credential_mode(&self, username: &str) -> DomainResult<Option<CredentialMode>> {
        let accounts = self.load_accounts()?;
        Ok(accounts
            .get(username)
            .map(|account| account.credential().mode()))
    }

    /// The username remembered for login-form auto-fill, if any.
    pub fn remembered_username(&self) -> DomainResult<Option<String>> {
        Ok(self.store.get(key::REMEMBERED_USERNAME)?)
    }

    pub fn remember_username(&self, username: &str) -> DomainResult<()> {
        self.store
            .set(key::REMEMBERED_USERNAME, username.to_string())?;
        Ok(())
    }

    pub fn forget_username(&self) -> DomainResult<()> {
        self.store.remove(key::REMEMBERED_USERNAME)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn restore_session(&self) -> DomainResult<Option<Session>> {
        let Some(raw) = self.store.get(key::CURRENT_USER)? else {
            return Ok(None);
        };

        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("discarding unreadable session pointer: {e}");
                return Ok(None);
            }
        };

        let accounts = self.load_accounts()?;
        if !accounts.contains_key(session.username()) {
            tracing::warn!(
                "discarding session pointer for unknown account {}",
                session.username()
            );
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Persist the session pointer, then commit it in memory.
    fn establish_session(&mut self, username: &str) -> DomainResult<Session> {
        let session = Session::new(username);
        let encoded = serde_json::to_string(&session)
            .map_err(|e| DomainError::storage(format!("encode session: {e}")))?;
        self.store.set(key::CURRENT_USER, encoded)?;
        self.session = Some(session.clone());
        Ok(session)
    }

    fn load_accounts(&self) -> DomainResult<BTreeMap<String, Account>> {
        match self.store.get(key::USERS)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| DomainError::storage(format!("decode accounts: {e}"))),
            None => Ok(BTreeMap::new()),
        }
    }

    fn persist_accounts(&self, accounts: &BTreeMap<String, Account>) -> DomainResult<()> {
        let encoded = serde_json::to_string(accounts)
            .map_err(|e| DomainError::storage(format!("encode accounts: {e}")))?;
        self.store.set(key::USERS, encoded)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
