//! Thumbnail sizing and the persisted thumbnail store.
//!
//! The session picker shows a small preview of each session.  The viewer
//! periodically snapshots the display, shrinks it to fit a fixed bounding box,
//! and records it under the session identifier in a single JSON document in
//! durable client-side storage:
//!
//! ```json
//! {"lab-1":"data:image/png;base64,iVBOR...","build":"data:image/png;base64,..."}
//! ```
//!
//! The storage API has no partial-key access, so every update reads the whole
//! document, merges one entry, and writes the whole document back.  Entries for
//! other sessions must survive that cycle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Returns the factor that shrinks a `width`×`height` raster to fit inside
/// `max_width`×`max_height` while preserving aspect ratio.
///
/// Never upscales: the result is capped at `1.0`.
pub fn thumbnail_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    let fit_w = f64::from(max_width) / f64::from(width);
    let fit_h = f64::from(max_height) / f64::from(height);
    fit_w.min(fit_h).min(1.0)
}

/// Returns the pixel dimensions of the thumbnail for a `width`×`height` raster.
///
/// Fractional sizes are truncated, but a non-empty axis never shrinks below one
/// pixel.  An empty raster yields `(0, 0)`.
pub fn thumbnail_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = thumbnail_scale(width, height, max_width, max_height);
    // The epsilon absorbs representation error, e.g. 1920 * (320 / 1920).
    let scaled = |extent: u32| ((f64::from(extent) * scale + 1e-9) as u32).max(1);
    (scaled(width), scaled(height))
}

/// Mapping from session identifier to the most recent thumbnail data URL.
///
/// Entries whose value is not a string are kept as they are, so a write never
/// drops a key some other writer put in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThumbnailStore {
    entries: Map<String, Value>,
}

impl ThumbnailStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted store.
    ///
    /// Absent data, invalid JSON, or a document that is not a JSON object is
    /// treated as an empty store; the failure is logged and never surfaced.
    pub fn from_persisted(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::new();
        };
        match serde_json::from_str(raw) {
            Ok(store) => store,
            Err(e) => {
                warn!("discarding malformed thumbnail store: {e}");
                Self::new()
            }
        }
    }

    /// Serializes the store for persistence.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Sets or replaces the thumbnail for `session_id`, leaving all other
    /// entries untouched.
    pub fn upsert(&mut self, session_id: impl Into<String>, data_url: impl Into<String>) {
        self.entries
            .insert(session_id.into(), Value::String(data_url.into()));
    }

    /// Returns the thumbnail for `session_id`, if a string is stored there.
    pub fn get(&self, session_id: &str) -> Option<&str> {
        self.entries.get(session_id).and_then(Value::as_str)
    }

    /// Iterates over the stored session identifiers in sorted order.
    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
