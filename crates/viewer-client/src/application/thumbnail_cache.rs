//! ThumbnailCache: stores a small preview of the current display.
//!
//! A capture flattens the display, scales it into the configured bounding box,
//! and merges the resulting data URL into the JSON mapping kept under one
//! storage key:
//!
//! ```text
//! flatten ──► thumbnail_data_url ──► get_item(key) ──► upsert(session_id) ──► set_item(key)
//! ```
//!
//! The mapping is read and written as a whole, so every capture preserves the
//! entries of other sessions.  An unreadable or malformed mapping is replaced
//! by an empty one.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use viewer_core::ThumbnailStore;

use crate::domain::config::ViewerConfig;

use super::raster::{thumbnail_data_url, RasterError};
use super::session::{RemoteSession, SessionError};
use super::storage::{DurableStorage, StorageError};

/// Error type for a thumbnail capture.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// The display could not be flattened.
    #[error("could not snapshot display: {0}")]
    Snapshot(#[from] SessionError),

    /// The snapshot could not be scaled or encoded.
    #[error("could not encode thumbnail: {0}")]
    Raster(#[from] RasterError),

    /// The updated mapping could not be serialized.
    #[error("could not serialize thumbnail store: {0}")]
    Format(#[from] serde_json::Error),

    /// The updated mapping could not be written.
    #[error("could not persist thumbnail store: {0}")]
    Storage(#[from] StorageError),
}

/// Captures thumbnails of one session into durable storage.
///
/// Cheap to clone; the repeating capture timer owns a clone.
#[derive(Clone)]
pub struct ThumbnailCache {
    session: Arc<dyn RemoteSession>,
    storage: Arc<dyn DurableStorage>,
    session_id: String,
    storage_key: String,
    max_width: u32,
    max_height: u32,
}

impl ThumbnailCache {
    pub fn new(
        session: Arc<dyn RemoteSession>,
        storage: Arc<dyn DurableStorage>,
        session_id: impl Into<String>,
        config: &ViewerConfig,
    ) -> Self {
        Self {
            session,
            storage,
            session_id: session_id.into(),
            storage_key: config.storage_key.clone(),
            max_width: config.thumbnail_max_width,
            max_height: config.thumbnail_max_height,
        }
    }

    /// Captures the display and stores it under this session's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError`] if the snapshot, encoding, or final write
    /// fails.  A failed read of the existing mapping is not an error.
    pub fn capture(&self) -> Result<(), ThumbnailError> {
        let snapshot = self.session.flatten()?;
        let data_url = thumbnail_data_url(&snapshot, self.max_width, self.max_height)?;

        let existing = self.storage.get_item(&self.storage_key).unwrap_or_else(|e| {
            warn!(key = %self.storage_key, "treating unreadable thumbnail store as empty: {e}");
            None
        });
        let mut store = ThumbnailStore::from_persisted(existing.as_deref());
        store.upsert(self.session_id.as_str(), data_url);

        self.storage.set_item(&self.storage_key, &store.to_json()?)?;
        debug!(
            session_id = %self.session_id,
            entries = store.len(),
            "thumbnail stored"
        );
        Ok(())
    }

    /// Runs [`capture`](Self::capture), logging instead of returning failures.
    pub fn capture_logged(&self) {
        if let Err(e) = self.capture() {
            warn!(session_id = %self.session_id, "thumbnail capture failed: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
