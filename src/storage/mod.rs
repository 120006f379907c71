//! Key-value persistence boundary.
//!
//! The engine never touches a storage backend directly. A caller hands a
//! [`KeyValueStore`] to [`Session::load`](crate::Session::load) /
//! [`Session::save`](crate::Session::save); values are JSON strings so a
//! browser `localStorage` shim, a file, or the in-memory store all work.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Stored candidate list.
pub const OPTIONS_KEY: &str = "rifa-wheel-options";
/// Stored round counter.
pub const ROUND_COUNT_KEY: &str = "rifa-round-count";
/// Stored rig table.
pub const RIGGED_KEY: &str = "rifa-rigged-outcomes";
/// Stored settings record.
pub const SETTINGS_KEY: &str = "rifa-settings";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to encode value: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// String key-value store.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: String);

    /// Delete a value. No-op if absent.
    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("a", "1".to_string());
        store.set("a", "2".to_string());
        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a");
        store.remove("missing");
        assert_eq!(store.get("a"), None);
    }
}
