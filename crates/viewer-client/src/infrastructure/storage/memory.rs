//! In-process key-value storage.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::storage::{DurableStorage, StorageError};

/// A `HashMap`-backed store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key`, as if an earlier page load had written it.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl DurableStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().expect("lock poisoned").get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .expect("lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
