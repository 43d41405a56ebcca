//! Credential modes and their format rules.

use serde::{Deserialize, Serialize};

use daybook_core::{DomainError, DomainResult, ValueObject};

/// Authentication scheme of an account. The three modes are mutually
/// exclusive; switching modes replaces the whole credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    Password,
    Pin,
    None,
}

impl core::fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CredentialMode::Password => write!(f, "password"),
            CredentialMode::Pin => write!(f, "pin"),
            CredentialMode::None => write!(f, "none"),
        }
    }
}

/// A stored credential: mode plus the plain value presented at login.
///
/// Values are stored and compared as plain text, byte for byte. That is the
/// deliberate posture of this system (local, single device, storage already
/// fully readable by the device holder) and not a security boundary.
///
/// # Invariants
/// - `Pin` values are 4-6 ASCII digits.
/// - `Password` values are at least 4 characters.
/// - `None` carries no value; only an empty presented credential matches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum Credential {
    Password(String),
    Pin(String),
    None,
}

impl Credential {
    /// Build a credential from raw input, enforcing the mode's format rule.
    ///
    /// Mode `None` overrides any supplied raw value; the other modes reject
    /// empty input before applying their format rule. Error messages are
    /// user-facing.
    pub fn new(mode: CredentialMode, raw: &str) -> DomainResult<Self> {
        match mode {
            CredentialMode::None => Ok(Credential::None),
            _ if raw.is_empty() => Err(DomainError::validation("Password/PIN is required")),
            CredentialMode::Pin => {
                if is_valid_pin(raw) {
                    Ok(Credential::Pin(raw.to_string()))
                } else {
                    Err(DomainError::validation("PIN must be 4-6 digits"))
                }
            }
            CredentialMode::Password => {
                if raw.chars().count() >= 4 {
                    Ok(Credential::Password(raw.to_string()))
                } else {
                    Err(DomainError::validation(
                        "Password must be at least 4 characters",
                    ))
                }
            }
        }
    }

    pub fn mode(&self) -> CredentialMode {
        match self {
            Credential::Password(_) => CredentialMode::Password,
            Credential::Pin(_) => CredentialMode::Pin,
            Credential::None => CredentialMode::None,
        }
    }

    /// The stored value; empty for mode `none`.
    pub fn value(&self) -> &str {
        match self {
            Credential::Password(v) | Credential::Pin(v) => v,
            Credential::None => "",
        }
    }

    /// Byte-equal comparison against a presented credential.
    pub fn matches(&self, supplied: &str) -> bool {
        self.value() == supplied
    }
}

impl ValueObject for Credential {}

fn is_valid_pin(raw: &str) -> bool {
    (4..=6).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_digit())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_accepts_four_to_six_digits() {
        assert!(Credential::new(CredentialMode::Pin, "1234").is_ok());
        assert!(Credential::new(CredentialMode::Pin, "123456").is_ok());
    }

    #[test]
    fn pin_rejects_bad_formats() {
        for raw in ["123", "1234567", "12a4", "12.4", "١٢٣٤"] {
            let err = Credential::new(CredentialMode::Pin, raw).unwrap_err();
            match err {
                DomainError::Validation(msg) => assert_eq!(msg, "PIN must be 4-6 digits"),
                _ => panic!("expected Validation error"),
            }
        }
    }

    #[test]
    fn password_requires_four_characters() {
        assert!(Credential::new(CredentialMode::Password, "abcd").is_ok());

        let err = Credential::new(CredentialMode::Password, "abc").unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "Password must be at least 4 characters")
            }
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn empty_input_is_rejected_before_format_checks() {
        for mode in [CredentialMode::Pin, CredentialMode::Password] {
            let err = Credential::new(mode, "").unwrap_err();
            match err {
                DomainError::Validation(msg) => assert_eq!(msg, "Password/PIN is required"),
                _ => panic!("expected Validation error"),
            }
        }
    }

    #[test]
    fn none_mode_overrides_supplied_value() {
        let cred = Credential::new(CredentialMode::None, "ignored").unwrap();
        assert_eq!(cred, Credential::None);
        assert_eq!(cred.value(), "");
    }

    #[test]
    fn none_matches_only_the_empty_credential() {
        let cred = Credential::None;
        assert!(cred.matches(""));
        assert!(!cred.matches("anything"));
    }

    #[test]
    fn matches_is_byte_exact() {
        let cred = Credential::new(CredentialMode::Password, "Secret1").unwrap();
        assert!(cred.matches("Secret1"));
        assert!(!cred.matches("secret1"));
        assert!(!cred.matches("Secret1 "));
    }

    #[test]
    fn wire_format_is_mode_tagged() {
        let pin = Credential::new(CredentialMode::Pin, "1234").unwrap();
        let json = serde_json::to_string(&pin).unwrap();
        assert_eq!(json, r#"{"mode":"pin","value":"1234"}"#);

        let none = serde_json::to_string(&Credential::None).unwrap();
        assert_eq!(none, r#"{"mode":"none"}"#);

        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pin);
    }
}
