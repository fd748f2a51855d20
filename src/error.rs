//! Error taxonomy
//!
//! Only `ValidationError` ever reaches the user (inline under the name field).
//! Storage and persistence errors are recovered inside the store and logged.

use thiserror::Error;

/// Form validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Employee name is required")]
    NameRequired,
}

/// Key-value backend failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// No backend available (no window, storage disabled, private mode)
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure moving the roster in or out of storage
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored roster is malformed: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("roster could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}
