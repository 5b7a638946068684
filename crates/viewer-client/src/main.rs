//! viewer-replay: drives the viewer controller from an event script.
//!
//! The binary builds a [`Viewer`](viewer_client::Viewer) wired to recording
//! collaborators (a session object with a solid-colour framebuffer, a page
//! viewport, status overlay, title, and clipboard), replays a JSON-lines
//! script through it, and prints a JSON report of everything that reached the
//! session object and the page.
//!
//! # Usage
//!
//! ```text
//! viewer-replay --script <PATH> [OPTIONS]
//!
//! Options:
//!   --script <PATH>         JSON-lines event script
//!   --config <PATH>         Viewer config TOML [default: built-in defaults]
//!   --session-id <ID>       Session identifier for the thumbnail store
//!   --query <QUERY>         Page query string to read the identifier from (`?id=...`)
//!   --storage-file <PATH>   Persist durable storage to this JSON file
//!   --no-storage            Replay a page without durable storage
//!   --display <WxH>         Remote framebuffer size [default: 1024x768]
//!   --window <WxH>          Browser window size [default: 1024x768]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable               | Description                 |
//! |------------------------|-----------------------------|
//! | `VIEWER_SCRIPT`        | Event script path           |
//! | `VIEWER_CONFIG`        | Config file path            |
//! | `VIEWER_SESSION_ID`    | Session identifier          |
//! | `VIEWER_QUERY`         | Page query string           |
//! | `VIEWER_STORAGE_FILE`  | Durable storage file        |
//!
//! Log output goes to stderr; `RUST_LOG` overrides the configured level.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use viewer_client::application::storage::DurableStorage;
use viewer_client::infrastructure::config::load_config;
use viewer_client::infrastructure::replay::{load_script, ReplayHarness, ReplayOptions};
use viewer_client::infrastructure::storage::{file::FileStorage, memory::MemoryStorage};
use viewer_client::infrastructure::timer::interval::IntervalScheduler;
use viewer_client::ViewerConfig;
use viewer_core::{session_id_from_query, Size};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// A `WIDTHxHEIGHT` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dimensions {
    width: u32,
    height: u32,
}

impl FromStr for Dimensions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid dimension '{v}': {e}"))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

/// Replays a viewer event script against recording collaborators.
#[derive(Debug, Parser)]
#[command(
    name = "viewer-replay",
    about = "Replay remote-display viewer events and report what the session received",
    version
)]
struct Cli {
    /// JSON-lines script of viewer events and host actions.
    #[arg(long, env = "VIEWER_SCRIPT")]
    script: PathBuf,

    /// Viewer configuration file (TOML).  Missing fields use defaults.
    #[arg(long, env = "VIEWER_CONFIG")]
    config: Option<PathBuf>,

    /// Session identifier used as the thumbnail store key.
    #[arg(long, env = "VIEWER_SESSION_ID", conflicts_with = "query")]
    session_id: Option<String>,

    /// Page query string; the identifier is the percent-decoded `id` value.
    #[arg(long, env = "VIEWER_QUERY")]
    query: Option<String>,

    /// File backing durable storage.  In-memory storage is used when absent.
    #[arg(long, env = "VIEWER_STORAGE_FILE", conflicts_with = "no_storage")]
    storage_file: Option<PathBuf>,

    /// Replay a page on which durable storage is unavailable.
    #[arg(long)]
    no_storage: bool,

    /// Remote framebuffer size.
    #[arg(long, default_value = "1024x768")]
    display: Dimensions,

    /// Browser window size.
    #[arg(long, default_value = "1024x768")]
    window: Dimensions,
}

impl Cli {
    /// The session identifier from `--session-id`, else from `--query`, else empty.
    fn session_id(&self) -> String {
        match (&self.session_id, &self.query) {
            (Some(id), _) => id.clone(),
            (None, Some(query)) => session_id_from_query(query),
            (None, None) => String::new(),
        }
    }

    fn storage(&self) -> Option<Arc<dyn DurableStorage>> {
        if self.no_storage {
            return None;
        }
        let storage: Arc<dyn DurableStorage> = match &self.storage_file {
            Some(path) => Arc::new(FileStorage::new(path)),
            None => Arc::new(MemoryStorage::new()),
        };
        Some(storage)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// A current-thread runtime keeps every event handler and timer tick on one
/// thread, one at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the configured level applies.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let steps = load_script(&cli.script)
        .with_context(|| format!("failed to load script {}", cli.script.display()))?;
    if steps.is_empty() {
        bail!("script {} contains no steps", cli.script.display());
    }

    let timers = IntervalScheduler::try_current().context("no tokio runtime for timers")?;
    let session_id = cli.session_id();
    info!(%session_id, steps = steps.len(), "viewer-replay starting");

    let mut harness = ReplayHarness::new(ReplayOptions {
        config,
        session_id,
        storage: cli.storage(),
        timers: Arc::new(timers),
        display: (cli.display.width, cli.display.height),
        window: Size::new(f64::from(cli.window.width), f64::from(cli.window.height)),
    });
    let report = harness.run(steps).await;

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        // Arrange / Act
        let cli = Cli::parse_from(["viewer-replay", "--script", "events.jsonl"]);

        // Assert
        assert_eq!(cli.script, PathBuf::from("events.jsonl"));
        assert_eq!(
            cli.display,
            Dimensions {
                width: 1024,
                height: 768
            }
        );
        assert!(!cli.no_storage);
        assert!(cli.storage().is_some());
    }

    #[test]
    fn test_session_id_from_query_is_decoded() {
        let cli = Cli::parse_from([
            "viewer-replay",
            "--script",
            "s",
            "--query",
            "?id=lab%201",
        ]);
        assert_eq!(cli.session_id(), "lab 1");
    }

    #[test]
    fn test_explicit_session_id_wins() {
        let cli = Cli::parse_from(["viewer-replay", "--script", "s", "--session-id", "abc"]);
        assert_eq!(cli.session_id(), "abc");
    }

    #[test]
    fn test_missing_session_id_is_empty() {
        let cli = Cli::parse_from(["viewer-replay", "--script", "s"]);
        assert_eq!(cli.session_id(), "");
    }

    #[test]
    fn test_no_storage_disables_storage() {
        let cli = Cli::parse_from(["viewer-replay", "--script", "s", "--no-storage"]);
        assert!(cli.storage().is_none());
    }

    #[test]
    fn test_session_id_and_query_conflict() {
        let result = Cli::try_parse_from([
            "viewer-replay",
            "--script",
            "s",
            "--session-id",
            "a",
            "--query",
            "?id=b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dimensions_parse() {
        assert_eq!(
            "1280x720".parse::<Dimensions>(),
            Ok(Dimensions {
                width: 1280,
                height: 720
            })
        );
        assert!("1280".parse::<Dimensions>().is_err());
        assert!("axb".parse::<Dimensions>().is_err());
    }
}
