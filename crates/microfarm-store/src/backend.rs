//! # Storage Backends
//!
//! The key/value substrate the store is built on.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Storage Backends                               │
//! │                                                                     │
//! │  Store (store.rs)                                                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StorageBackend (trait)                                             │
//! │       │                                                             │
//! │       ├── MemoryBackend   HashMap + optional byte budget            │
//! │       │                   (tests, quota simulation)                 │
//! │       │                                                             │
//! │       └── FileBackend     one file per key + optional byte budget   │
//! │                           (production: a local, single-client dir)  │
//! │                                                                     │
//! │  Both enforce the SAME quota rule: a put that would push the        │
//! │  total stored bytes past the budget fails with QuotaExceeded        │
//! │  and leaves the previous value intact.                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes to the same key are serialized by an internal lock, so the
//! read-modify-write patterns above this layer cannot race with
//! themselves.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// A key-scoped durable store.
pub trait StorageBackend: std::fmt::Debug + Send + Sync {
    /// Reads the raw value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Fails with [`StoreError::QuotaExceeded`] when the write would push
    /// the total stored bytes past the budget; the previous value is left
    /// intact in that case.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`; absent keys are a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Total bytes currently stored across all keys.
    fn used_bytes(&self) -> usize;
}

fn check_budget(
    key: &str,
    budget: Option<usize>,
    used_without_key: usize,
    incoming: usize,
) -> StoreResult<()> {
    if let Some(budget) = budget {
        let attempted = used_without_key + incoming;
        if attempted > budget {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                attempted,
                budget,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend. The test vehicle, and the quota-behavior reference
/// implementation.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    budget: Option<usize>,
}

impl MemoryBackend {
    /// Creates an unbounded in-memory backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Creates an in-memory backend that fails writes past `budget`
    /// total bytes.
    pub fn with_budget(budget: usize) -> Self {
        MemoryBackend {
            entries: Mutex::new(HashMap::new()),
            budget: Some(budget),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock means a panic mid-write in this same process;
        // the map itself is still a complete previous state.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.lock();
        let used_without_key: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        check_budget(key, self.budget, used_without_key, value.len())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn used_bytes(&self) -> usize {
        self.lock().values().map(String::len).sum()
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// File-per-key backend over a local directory.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    budget: Option<usize>,
    /// Serializes writers; see module docs.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Opens (creating if needed) an unbounded file backend at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(dir, None)
    }

    /// Opens a file backend with a byte budget.
    pub fn open_with_budget(dir: impl AsRef<Path>, budget: usize) -> StoreResult<Self> {
        Self::open_with(dir, Some(budget))
    }

    fn open_with(dir: impl AsRef<Path>, budget: Option<usize>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileBackend {
            dir,
            budget,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn stored_bytes(&self, skip_key: Option<&str>) -> StoreResult<usize> {
        let skip = skip_key.map(|k| format!("{k}.json"));
        let mut total = 0usize;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(skip) = &skip {
                if entry.file_name().to_string_lossy() == skip.as_str() {
                    continue;
                }
            }
            let meta = entry.metadata()?;
            if meta.is_file() {
                total += meta.len() as usize;
            }
        }
        Ok(total)
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let used_without_key = self.stored_bytes(Some(key))?;
        check_budget(key, self.budget, used_without_key, value.len())?;

        // temp file + rename so readers never observe a torn record
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn used_bytes(&self) -> usize {
        self.stored_bytes(None).unwrap_or(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.put("k", "value").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("value"));

        backend.remove("k").unwrap();
        backend.remove("k").unwrap(); // absent: no-op
        assert_eq!(backend.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_quota_rejects_and_preserves_old_value() {
        let backend = MemoryBackend::with_budget(10);
        backend.put("k", "12345").unwrap();

        let err = backend.put("k", "12345678901").unwrap_err();
        assert!(err.is_quota());
        // the previous value survives the failed write
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_memory_quota_counts_replacement_not_sum() {
        let backend = MemoryBackend::with_budget(10);
        backend.put("k", "123456789").unwrap();
        // replacing a 9-byte value with another 9 bytes stays in budget
        backend.put("k", "987654321").unwrap();
        assert_eq!(backend.used_bytes(), 9);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.get("mf_products_v1").unwrap(), None);
        backend.put("mf_products_v1", "[]").unwrap();
        assert_eq!(backend.get("mf_products_v1").unwrap().as_deref(), Some("[]"));

        backend.remove("mf_products_v1").unwrap();
        assert_eq!(backend.get("mf_products_v1").unwrap(), None);
    }

    #[test]
    fn test_file_quota() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open_with_budget(dir.path(), 8).unwrap();

        backend.put("a", "1234").unwrap();
        backend.put("b", "1234").unwrap();
        let err = backend.put("c", "1").unwrap_err();
        assert!(err.is_quota());
        assert_eq!(backend.used_bytes(), 8);
    }
}
