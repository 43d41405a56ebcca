//! `daybook-auth` — accounts, credentials, and the session lifecycle.
//!
//! This crate is intentionally decoupled from any UI. Hosts drive it
//! through [`CredentialStore`] and surface its error messages verbatim.

pub mod account;
pub mod credential;
pub mod service;
pub mod session;

pub use account::Account;
pub use credential::{Credential, CredentialMode};
pub use service::CredentialStore;
pub use session::Session;
