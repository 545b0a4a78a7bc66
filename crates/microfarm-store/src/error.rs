//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                              │
//! │                                                                     │
//! │  Backend failure (quota / I/O)                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds the key and budget context         │
//! │       │                                                             │
//! │       ├── QuotaExceeded → degrade-and-retry policy (repositories)   │
//! │       │                                                             │
//! │       └── everything else → surfaced to the caller                  │
//! │                                                                     │
//! │  No store error is fatal: every failure mode has a defined          │
//! │  fallback or no-op.                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would push the store past its byte budget.
    ///
    /// ## When This Occurs
    /// - An inline image payload blows up a record
    /// - The store directory simply filled up
    ///
    /// The repositories react with the degrade-and-retry policy; a
    /// second failure is surfaced as final.
    #[error("Storage quota exceeded writing '{key}': {attempted} bytes against a budget of {budget}")]
    QuotaExceeded {
        key: String,
        attempted: usize,
        budget: usize,
    },

    /// Filesystem failure outside quota accounting.
    #[error("Storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("Serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A business rule rejected the operation before any write happened.
    #[error(transparent)]
    Core(#[from] microfarm_core::CoreError),
}

impl StoreError {
    /// Whether the error is a storage-capacity failure - the only kind
    /// the degrade-and-retry policy reacts to.
    pub fn is_quota(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

impl From<microfarm_core::ValidationError> for StoreError {
    fn from(err: microfarm_core::ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
