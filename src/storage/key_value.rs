use std::collections::HashMap;
use std::path::PathBuf;

use snafu::Snafu;

/// Persistence medium for serialized trees: a flat string-to-string store.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Overwrites any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Volatile store, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    #[snafu(display("Invalid storage key '{}'", key))]
    InvalidKey { key: String },
    #[snafu(display("Failed to read {}", path.display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write {}", path.display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").expect("Memory store never fails"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_set_overwrites() {
        let mut store = MemoryStore::new().with_entry("fs", "old");
        store.set("fs", "new".to_string()).expect("Memory store never fails");

        assert_eq!(store.get("fs").expect("Memory store never fails").as_deref(), Some("new"));
        assert_eq!(store.len(), 1);
    }
}
