//! File-backed key-value storage.
//!
//! All keys share one JSON object document:
//!
//! ```json
//! { "VIEWER_THUMBNAILS": "{\"abc\":\"data:image/png;base64,...\"}" }
//! ```
//!
//! Every `set_item` re-reads the document, replaces one key, and writes the
//! whole document back, so keys written by other processes between calls are
//! kept.  A corrupt document is reported by `get_item` but replaced by the next
//! `set_item`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::application::storage::{DurableStorage, StorageError};

type Document = BTreeMap<String, String>;

/// A JSON document on disk holding string keys and values.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens storage at `path`.  The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_document(&self) -> Result<Document, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Document::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl DurableStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().expect("lock poisoned");
        let mut document = match self.read_document() {
            Err(StorageError::Format(e)) => {
                warn!(path = %self.path.display(), "replacing corrupt storage document: {e}");
                Document::new()
            }
            other => other?,
        };
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document)?;
        debug!(key, path = %self.path.display(), "storage item written");
        Ok(())
    }
}
