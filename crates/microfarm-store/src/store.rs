//! # Store
//!
//! The quota-aware save/fallback discipline shared by every repository.
//!
//! ## Read/Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  save_safe(key, value)                                              │
//! │       serialize ──► put ──► true                                    │
//! │                      │                                              │
//! │                      └── quota/I/O failure ──► log, false           │
//! │                          (never panics, never throws)               │
//! │                                                                     │
//! │  load_or_seed(key, defaults)                                        │
//! │       missing key  ──► defaults, persisted opportunistically        │
//! │       corrupt data ──► defaults (parse error logged, not thrown)    │
//! │       good data    ──► parsed records                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::error::StoreResult;

/// Cloneable handle over a storage backend.
///
/// Repositories each hold a clone, the way a connection pool handle is
/// shared in a database-backed layer.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    /// Wraps an arbitrary backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Store { backend }
    }

    /// An unbounded in-memory store (tests, demos).
    pub fn in_memory() -> Self {
        Store::new(Arc::new(MemoryBackend::new()))
    }

    /// An in-memory store with a byte budget (quota scenarios).
    pub fn in_memory_with_budget(budget: usize) -> Self {
        Store::new(Arc::new(MemoryBackend::with_budget(budget)))
    }

    /// A file-backed store over a local directory.
    pub fn open(dir: impl AsRef<std::path::Path>) -> StoreResult<Self> {
        Ok(Store::new(Arc::new(FileBackend::open(dir)?)))
    }

    /// Serializes and stores a record, propagating failures.
    ///
    /// Repositories that need to *react* to a capacity failure (the
    /// degrade-and-retry policy) call this; everything else goes through
    /// [`Store::save_safe`].
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.put(key, &raw)
    }

    /// Serializes and stores a record; reports success as a boolean and
    /// never lets a capacity failure escape.
    pub fn save_safe<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match self.save(key, value) {
            Ok(()) => true,
            Err(err) if err.is_quota() => {
                warn!(key, %err, "storage quota exceeded, save dropped");
                false
            }
            Err(err) => {
                error!(key, %err, "save failed");
                false
            }
        }
    }

    /// Loads a record sequence, falling back to (and opportunistically
    /// persisting) the given default data set.
    ///
    /// - Missing key: the defaults are produced, persisted, and returned,
    ///   so subsequent reads are consistent.
    /// - Corrupt/unparseable data: the defaults are returned; the parse
    ///   error is logged, never propagated.
    pub fn load_or_seed<T, F>(&self, key: &str, defaults: F) -> Vec<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        match self.backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(key, %err, "corrupt record, falling back to defaults");
                    defaults()
                }
            },
            Ok(None) => {
                debug!(key, "seeding defaults");
                let seeded = defaults();
                self.save_safe(key, &seeded);
                seeded
            }
            Err(err) => {
                error!(key, %err, "read failed, falling back to defaults");
                defaults()
            }
        }
    }

    /// Loads a record sequence whose documented default is empty.
    pub fn load<T: Serialize + DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.load_or_seed(key, Vec::new)
    }

    /// Reads the raw value under a key.
    pub fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.backend.get(key)
    }

    /// Removes a key; absent keys are a no-op.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        self.backend.remove(key)
    }

    /// Total bytes currently stored.
    pub fn used_bytes(&self) -> usize {
        self.backend.used_bytes()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_safe_reports_quota_as_false() {
        let store = Store::in_memory_with_budget(4);
        assert!(store.save_safe("k", &"ab")); // "ab" → 4 bytes of JSON
        assert!(!store.save_safe("k", &"a long string over budget"));
        // previous value intact
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("\"ab\""));
    }

    #[test]
    fn test_load_or_seed_persists_defaults_on_missing_key() {
        let store = Store::in_memory();
        let records: Vec<String> = store.load_or_seed("k", || vec!["a".to_string()]);
        assert_eq!(records, ["a"]);
        // subsequent raw read sees the seeded value
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("[\"a\"]"));
    }

    #[test]
    fn test_load_or_seed_falls_back_on_corrupt_data() {
        let store = Store::in_memory();
        store.save("k", &"not an array").unwrap();
        let records: Vec<u32> = store.load_or_seed("k", || vec![7]);
        assert_eq!(records, [7]);
        // corrupt payload is NOT overwritten by the fallback read
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("\"not an array\""));
    }

    #[test]
    fn test_load_defaults_to_empty() {
        let store = Store::in_memory();
        let records: Vec<u32> = store.load("missing");
        assert!(records.is_empty());
    }
}
