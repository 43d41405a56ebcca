use std::collections::HashMap;
use std::sync::RwLock;

use crate::kv::{KeyValueStore, StoreError};

/// In-memory key-value store.
///
/// Intended for tests/dev. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Lock("memory store read".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Lock("memory store write".to_string()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Lock("memory store write".to_string()))?;
        map.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let store = MemoryStore::new();
        store.set("users", "{}".to_string()).unwrap();
        assert_eq!(store.get("users").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("currentUser").unwrap(), None);
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = MemoryStore::new();
        store.set("k", "first".to_string()).unwrap();
        store.set("k", "second".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string()).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
