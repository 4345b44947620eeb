//! In-memory storage backend.
//!
//! Used by tests and as a fallback when the data directory cannot be opened,
//! in which case favorites still work for the lifetime of the plugin but are
//! not persisted.

use crate::domain::error::{BookfinderError, Result};
use crate::storage::backend::Storage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Map-backed storage.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what the code under test persisted, or hand the same map to a
/// second store to simulate a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
    /// When set, every write fails; used to exercise persistence failures.
    fail_writes: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one record.
    #[must_use]
    pub fn with_record(key: &str, contents: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut records) = storage.records.lock() {
            records.insert(key.to_string(), contents.to_string());
        }
        storage
    }

    /// A handle sharing this map whose writes always fail.
    #[must_use]
    pub fn failing_writes(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            fail_writes: true,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.records
            .lock()
            .map_err(|e| BookfinderError::Storage(format!("memory storage poisoned: {e}")))
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<()> {
        if self.fail_writes {
            return Err(BookfinderError::Storage("storage quota exceeded".to_string()));
        }
        self.lock()?.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_records() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.write("k", "v").unwrap();
        assert_eq!(b.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn failing_handle_rejects_writes_but_reads() {
        let storage = MemoryStorage::with_record("k", "v");
        let mut failing = storage.failing_writes();
        assert!(failing.write("k", "w").is_err());
        assert_eq!(failing.read("k").unwrap().as_deref(), Some("v"));
    }
}
