//! TOML persistence for [`ViewerConfig`].
//!
//! The viewer reads its tunables from an optional TOML file.  A missing file
//! is not an error: the defaults are a complete, working configuration, and
//! any field left out of a partial file falls back to its serde default.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::config::ViewerConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Loads a [`ViewerConfig`] from `path`, returning the defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<ViewerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(ViewerConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &ViewerConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");

        // Act
        let cfg = load_config(&path).unwrap();

        // Assert
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn test_save_then_load_preserves_overrides() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("viewer.toml");
        let cfg = ViewerConfig {
            thumbnail_interval_secs: 30,
            connection_name: "Build Server".to_string(),
            ..ViewerConfig::default()
        };

        // Act
        save_config(&path, &cfg).unwrap();
        let loaded = load_config(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_config_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_on_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_config(dir.path());

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
