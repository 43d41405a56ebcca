//! `daybook-store` — namespaced key-value persistence substrate.
//!
//! One text blob per key; owning components encode and decode their own
//! collections. See [`key`] for the well-known key names.

pub mod file;
pub mod key;
pub mod kv;
pub mod memory;

pub use file::FileStore;
pub use kv::{KeyValueStore, StoreError};
pub use memory::MemoryStore;
