//! Viewer configuration.
//!
//! [`ViewerConfig`] is the single source of truth for the viewer's tunables.
//! It is read from a TOML file by the infrastructure layer (see
//! [`crate::infrastructure::config`]); every field has a default so a missing
//! or partial file still yields a working viewer.
//!
//! ```toml
//! thumbnail_interval_secs = 5
//! thumbnail_max_width = 320
//! thumbnail_max_height = 240
//! storage_key = "VIEWER_THUMBNAILS"
//! connection_name = "Remote Display"
//! log_level = "info"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// All runtime configuration for the viewer controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Seconds between thumbnail captures while connected.
    #[serde(default = "default_thumbnail_interval_secs")]
    pub thumbnail_interval_secs: u64,
    /// Thumbnail bounding box width in pixels.
    #[serde(default = "default_thumbnail_max_width")]
    pub thumbnail_max_width: u32,
    /// Thumbnail bounding box height in pixels.
    #[serde(default = "default_thumbnail_max_height")]
    pub thumbnail_max_height: u32,
    /// Durable-storage key holding the JSON session → thumbnail mapping.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Connection name shown in the title until the remote host announces one.
    /// An empty string means "no name".
    #[serde(default = "default_connection_name")]
    pub connection_name: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ViewerConfig {
    /// The thumbnail capture period.
    ///
    /// A configured value of zero is raised to one second; a zero-period
    /// repeating timer would spin.
    pub fn thumbnail_interval(&self) -> Duration {
        Duration::from_secs(self.thumbnail_interval_secs.max(1))
    }

    /// The initial connection name, or `None` if configured empty.
    pub fn initial_connection_name(&self) -> Option<String> {
        (!self.connection_name.is_empty()).then(|| self.connection_name.clone())
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_thumbnail_interval_secs() -> u64 {
    5
}
fn default_thumbnail_max_width() -> u32 {
    320
}
fn default_thumbnail_max_height() -> u32 {
    240
}
fn default_storage_key() -> String {
    "VIEWER_THUMBNAILS".to_string()
}
fn default_connection_name() -> String {
    "Remote Display".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            thumbnail_interval_secs: default_thumbnail_interval_secs(),
            thumbnail_max_width: default_thumbnail_max_width(),
            thumbnail_max_height: default_thumbnail_max_height(),
            storage_key: default_storage_key(),
            connection_name: default_connection_name(),
            log_level: default_log_level(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thumbnail_interval_is_5s() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.thumbnail_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_thumbnail_bounds_are_320x240() {
        let cfg = ViewerConfig::default();
        assert_eq!((cfg.thumbnail_max_width, cfg.thumbnail_max_height), (320, 240));
    }

    #[test]
    fn test_zero_interval_is_raised_to_one_second() {
        let cfg = ViewerConfig {
            thumbnail_interval_secs: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(cfg.thumbnail_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_empty_connection_name_means_none() {
        let cfg = ViewerConfig {
            connection_name: String::new(),
            ..ViewerConfig::default()
        };
        assert_eq!(cfg.initial_connection_name(), None);
        assert_eq!(
            ViewerConfig::default().initial_connection_name().as_deref(),
            Some("Remote Display")
        );
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        // Arrange
        let text = "thumbnail_interval_secs = 10\nstorage_key = \"THUMBS\"\n";

        // Act
        let cfg: ViewerConfig = toml::from_str(text).expect("partial config must parse");

        // Assert
        assert_eq!(cfg.thumbnail_interval_secs, 10);
        assert_eq!(cfg.storage_key, "THUMBS");
        assert_eq!(cfg.thumbnail_max_width, 320);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_empty_toml_is_default_config() {
        let cfg: ViewerConfig = toml::from_str("").expect("empty config must parse");
        assert_eq!(cfg, ViewerConfig::default());
    }
}
