//! Submission store errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by submission persistence
#[derive(Debug, Error)]
pub enum StoreError {
    /// No submission with the given id
    #[error("submission '{0}' not found")]
    NotFound(Uuid),

    /// Underlying file I/O failed
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be serialized or decoded
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The in-process lock was poisoned by a panicking writer
    #[error("storage lock poisoned")]
    LockPoisoned,
}
