//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while writing to or inspecting a storage sink.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink refused or could not complete the operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted row could not be decoded.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
