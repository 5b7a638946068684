//! Script-driven replays of a viewer session.
//!
//! A replay wires a [`Viewer`] to the recording doubles, feeds it the steps of
//! a JSON-lines script, and reports what reached the session object and the
//! page.  It is the engine behind the `viewer-replay` binary and a convenient
//! harness for end-to-end tests.
//!
//! # Script format
//!
//! One JSON object per line.  Blank lines and lines starting with `#` are
//! skipped.  Besides plain [`ViewerEvent`]s, a few host actions are available:
//!
//! ```text
//! {"type":"Session","notification":{"kind":"StateChange","code":3}}
//! {"compose":"hello"}          set the composition text, then TextInput
//! {"window":[1280,720]}        resize the window, then WindowResize
//! {"scroll_to":[0,200]}        scroll the page, then Scroll
//! {"sleep_ms":5500}            let timers run
//! {"key_down":"Return"}        KeyDown for a named key ("Tab", "Left", "a", ...)
//! {"key_up":"Return"}          KeyUp for a named key
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use viewer_core::{Keysym, Point, PointerState, Size, ThumbnailStore};

use crate::application::context::ViewerContext;
use crate::application::storage::DurableStorage;
use crate::application::timer::TimerScheduler;
use crate::application::viewer::{Dispatch, Viewer};
use crate::domain::config::ViewerConfig;
use crate::domain::events::ViewerEvent;

use super::session::mock::RecordingSession;
use super::ui::mock::{
    MockCompositionTarget, OverlayState, RecordingClipboard, RecordingStatusView, RecordingTitle,
    RecordingViewport,
};

/// Error type for loading a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The script file could not be read.
    #[error("I/O error reading script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A script line is not a valid step.
    #[error("invalid step on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReplayStep {
    /// Replace the composition target's text, then dispatch `TextInput`.
    Compose { compose: String },
    /// Resize the window, then dispatch `WindowResize`.
    Window { window: [f64; 2] },
    /// Scroll the page to an absolute offset, then dispatch `Scroll`.
    ScrollTo { scroll_to: [f64; 2] },
    /// Wait, letting scheduled timers run.
    Sleep { sleep_ms: u64 },
    /// Dispatch `KeyDown` for a key given by name.
    KeyDown {
        #[serde(deserialize_with = "named_keysym")]
        key_down: Keysym,
    },
    /// Dispatch `KeyUp` for a key given by name.
    KeyUp {
        #[serde(deserialize_with = "named_keysym")]
        key_up: Keysym,
    },
    /// Dispatch an event as-is.
    Event(ViewerEvent),
}

fn named_keysym<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Keysym, D::Error> {
    let name = String::deserialize(deserializer)?;
    Keysym::from_name(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown key name '{name}'")))
}

/// Parses a JSON-lines script.
///
/// # Errors
///
/// Returns [`ReplayError::Parse`] naming the first invalid line (1-based).
pub fn parse_script(text: &str) -> Result<Vec<ReplayStep>, ReplayError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            serde_json::from_str(content).map_err(|source| ReplayError::Parse { line, source })
        })
        .collect()
}

/// Reads and parses a script file.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the file cannot be read and
/// [`ReplayError::Parse`] for an invalid line.
pub fn load_script(path: &Path) -> Result<Vec<ReplayStep>, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// How to build a replay.
pub struct ReplayOptions {
    pub config: ViewerConfig,
    pub session_id: String,
    /// `None` replays a page without durable storage.
    pub storage: Option<Arc<dyn DurableStorage>>,
    pub timers: Arc<dyn TimerScheduler>,
    /// Remote framebuffer size.
    pub display: (u32, u32),
    /// Initial browser window size.
    pub window: Size,
}

/// A key event as recorded by the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyRecord {
    pub pressed: bool,
    pub keysym: Keysym,
}

/// Everything a replay observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub session_id: String,
    pub title: Option<String>,
    pub status: OverlayState,
    pub steps: usize,
    pub mouse_events: Vec<PointerState>,
    pub key_events: Vec<KeyRecord>,
    pub sizes: Vec<(u32, u32)>,
    pub scales: Vec<f64>,
    pub clipboard: Vec<String>,
    pub disconnected: bool,
    /// Session identifiers present in the thumbnail store, sorted.
    pub thumbnails: Vec<String>,
}

/// A [`Viewer`] wired to recording collaborators.
pub struct ReplayHarness {
    pub session: Arc<RecordingSession>,
    pub viewport: Arc<RecordingViewport>,
    pub target: Arc<MockCompositionTarget>,
    pub status: Arc<RecordingStatusView>,
    pub title: Arc<RecordingTitle>,
    pub clipboard: Arc<RecordingClipboard>,
    storage: Option<Arc<dyn DurableStorage>>,
    storage_key: String,
    session_id: String,
    steps: usize,
    viewer: Viewer,
}

impl ReplayHarness {
    pub fn new(options: ReplayOptions) -> Self {
        let (width, height) = options.display;
        let session = Arc::new(RecordingSession::new(width, height));
        let window = options.window;
        let document = Size::new(
            f64::from(width).max(window.width),
            f64::from(height).max(window.height),
        );
        let viewport =
            Arc::new(RecordingViewport::new(window.width, window.height).with_document(document));
        let target = Arc::new(MockCompositionTarget::new());
        let status = Arc::new(RecordingStatusView::default());
        let title = Arc::new(RecordingTitle::new());
        let clipboard = Arc::new(RecordingClipboard::attached());
        let storage_key = options.config.storage_key.clone();

        let ctx = ViewerContext {
            session: session.clone(),
            viewport: viewport.clone(),
            composition_target: target.clone(),
            status: status.clone(),
            title: title.clone(),
            clipboard: clipboard.clone(),
            storage: options.storage.clone(),
            timers: options.timers,
            session_id: options.session_id.clone(),
            config: options.config,
        };

        Self {
            session,
            viewport,
            target,
            status,
            title,
            clipboard,
            storage: options.storage,
            storage_key,
            session_id: options.session_id,
            steps: 0,
            viewer: Viewer::attach(ctx),
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Runs one step.  Sleeps yield to the runtime so timers can fire.
    pub async fn step(&mut self, step: ReplayStep) -> Option<Dispatch> {
        self.steps += 1;
        debug!(?step, n = self.steps, "replay step");
        let event = match step {
            ReplayStep::Compose { compose } => {
                self.target.set_text(&compose);
                ViewerEvent::TextInput
            }
            ReplayStep::Window { window: [w, h] } => {
                self.viewport.set_window_size(Size::new(w, h));
                ViewerEvent::WindowResize
            }
            ReplayStep::ScrollTo { scroll_to: [x, y] } => {
                self.viewport.set_scroll(Point::new(x, y));
                ViewerEvent::Scroll
            }
            ReplayStep::Sleep { sleep_ms } => {
                tokio::time::sleep(Duration::from_millis(sleep_ms)).await;
                return None;
            }
            ReplayStep::KeyDown { key_down } => ViewerEvent::KeyDown { keysym: key_down },
            ReplayStep::KeyUp { key_up } => ViewerEvent::KeyUp { keysym: key_up },
            ReplayStep::Event(event) => event,
        };
        Some(self.viewer.dispatch(event))
    }

    /// Runs every step in order and reports the outcome.
    pub async fn run(&mut self, steps: Vec<ReplayStep>) -> ReplayReport {
        info!(steps = steps.len(), "replay started");
        for step in steps {
            self.step(step).await;
        }
        self.report()
    }

    pub fn report(&self) -> ReplayReport {
        ReplayReport {
            session_id: self.session_id.clone(),
            title: self.title.current(),
            status: self.status.state(),
            steps: self.steps,
            mouse_events: self.session.mouse_states(),
            key_events: self
                .session
                .key_events()
                .into_iter()
                .map(|(pressed, keysym)| KeyRecord { pressed, keysym })
                .collect(),
            sizes: self.session.sizes(),
            scales: self.session.applied_scales(),
            clipboard: self.clipboard.received(),
            disconnected: self.session.is_closed(),
            thumbnails: self.thumbnail_ids(),
        }
    }

    fn thumbnail_ids(&self) -> Vec<String> {
        let Some(storage) = &self.storage else {
            return Vec::new();
        };
        let raw = storage.get_item(&self.storage_key).unwrap_or_else(|e| {
            tracing::warn!("could not read thumbnail store: {e}");
            None
        });
        ThumbnailStore::from_persisted(raw.as_deref())
            .session_ids()
            .map(str::to_string)
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
