//! Durable client-side key-value storage.
//!
//! Modeled on the browser's local storage: string keys, string values, whole
//! values only.  There is no partial update, so callers that keep structured
//! data under one key must read, merge, and write back the whole value.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for durable storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be parsed or serialized.
    #[error("storage document is malformed: {0}")]
    Format(#[from] serde_json::Error),

    /// The storage backend refused the write (e.g. quota exceeded).
    #[error("storage rejected write to '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

/// A string key-value store that survives page reloads.
#[cfg_attr(test, mockall::automock)]
pub trait DurableStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
