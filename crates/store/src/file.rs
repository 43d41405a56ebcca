use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::kv::{KeyValueStore, StoreError};

/// File-backed key-value store.
///
/// Persists the whole key-value map as one JSON document, rewritten on
/// every mutation. Suited to the small, single-user data this system
/// holds; not a general-purpose database.
///
/// A failed disk write leaves the in-memory map untouched, so readers keep
/// seeing the last persisted state.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading the existing document if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("create {}: {e}", parent.display())))?;
        }

        let cache = if path.exists() {
            Self::load(&path)?
        } else {
            HashMap::new()
        };

        tracing::debug!("opened file store at {}", path.display());
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<HashMap<String, String>, StoreError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))
    }

    fn persist(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Corrupt(format!("encode store document: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| StoreError::Io(format!("write {}: {e}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self
            .cache
            .read()
            .map_err(|_| StoreError::Lock("file store read".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut map = self
            .cache
            .write()
            .map_err(|_| StoreError::Lock("file store write".to_string()))?;

        // Stage, persist, then commit to the cache.
        let mut staged = map.clone();
        staged.insert(key.to_string(), value);
        self.persist(&staged)?;
        *map = staged;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self
            .cache
            .write()
            .map_err(|_| StoreError::Lock("file store write".to_string()))?;

        let mut staged = map.clone();
        staged.remove(key);
        self.persist(&staged)?;
        *map = staged;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
