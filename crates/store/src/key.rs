//! Well-known storage keys.
//!
//! Key names are part of the persisted format; changing one orphans
//! existing data.

/// Map of username to account record, for every account on the device.
pub const USERS: &str = "users";

/// Pointer naming the account whose session is active.
pub const CURRENT_USER: &str = "currentUser";

/// Username auto-filled into the login form; a display hint only.
pub const REMEMBERED_USERNAME: &str = "rememberedUsername";

/// Key holding `username`'s work-day collection.
pub fn work_days_key(username: &str) -> String {
    format!("{username}_work-days")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
