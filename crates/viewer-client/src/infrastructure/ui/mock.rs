//! Recording UI host doubles.
//!
//! Each double keeps the state a real page would show (scroll offsets, overlay
//! visibility and styling, title text) behind a `Mutex` so tests can assert on
//! it after driving the controller.

use std::sync::Mutex;

use serde::Serialize;
use viewer_core::{Point, Size, ViewportMetrics};

use crate::application::host::{
    ClipboardError, ClipboardSink, CompositionTarget, StatusView, TitleSink, Viewport,
};

// ── Viewport ──────────────────────────────────────────────────────────────────

/// A scrollable window over a fixed-size document.
///
/// `scroll_by` clamps the offsets to `[0, document - visible]` like a browser
/// does, silently dropping the remainder.
pub struct RecordingViewport {
    metrics: Mutex<ViewportMetrics>,
    document: Mutex<Size>,
    display_offset: Mutex<Point>,
    window: Mutex<Size>,
    scroll_requests: Mutex<Vec<Point>>,
}

impl RecordingViewport {
    /// A `width`×`height` window showing a document of the same size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            metrics: Mutex::new(ViewportMetrics {
                width,
                height,
                scroll_x: 0.0,
                scroll_y: 0.0,
            }),
            document: Mutex::new(Size::new(width, height)),
            display_offset: Mutex::new(Point::default()),
            window: Mutex::new(Size::new(width, height)),
            scroll_requests: Mutex::new(Vec::new()),
        }
    }

    /// Sets the scrollable document size.
    pub fn with_document(self, document: Size) -> Self {
        *self.document.lock().expect("lock poisoned") = document;
        self
    }

    /// Sets the display element's document-space offset.
    pub fn with_display_offset(self, offset: Point) -> Self {
        *self.display_offset.lock().expect("lock poisoned") = offset;
        self
    }

    /// Sets the scroll offsets directly (as if the user scrolled).
    pub fn set_scroll(&self, offset: Point) {
        let mut metrics = self.metrics.lock().expect("lock poisoned");
        metrics.scroll_x = offset.x;
        metrics.scroll_y = offset.y;
    }

    /// Resizes the window; the visible viewport follows the window.
    pub fn set_window_size(&self, size: Size) {
        *self.window.lock().expect("lock poisoned") = size;
        let mut metrics = self.metrics.lock().expect("lock poisoned");
        metrics.width = size.width;
        metrics.height = size.height;
    }

    /// Every delta passed to `scroll_by`, before clamping.
    pub fn scroll_requests(&self) -> Vec<Point> {
        self.scroll_requests.lock().expect("lock poisoned").clone()
    }
}

impl Viewport for RecordingViewport {
    fn metrics(&self) -> ViewportMetrics {
        *self.metrics.lock().expect("lock poisoned")
    }

    fn display_offset(&self) -> Point {
        *self.display_offset.lock().expect("lock poisoned")
    }

    fn scroll_by(&self, delta: Point) {
        self.scroll_requests
            .lock()
            .expect("lock poisoned")
            .push(delta);
        let document = *self.document.lock().expect("lock poisoned");
        let mut metrics = self.metrics.lock().expect("lock poisoned");
        let max_x = (document.width - metrics.width).max(0.0);
        let max_y = (document.height - metrics.height).max(0.0);
        metrics.scroll_x = (metrics.scroll_x + delta.x).clamp(0.0, max_x);
        metrics.scroll_y = (metrics.scroll_y + delta.y).clamp(0.0, max_y);
    }

    fn window_size(&self) -> Size {
        *self.window.lock().expect("lock poisoned")
    }
}

// ── Composition target ────────────────────────────────────────────────────────

/// An in-memory hidden text field.
#[derive(Default)]
pub struct MockCompositionTarget {
    text: Mutex<String>,
    positions: Mutex<Vec<Point>>,
}

impl MockCompositionTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the field's text, as an input method would.
    pub fn set_text(&self, text: &str) {
        *self.text.lock().expect("lock poisoned") = text.to_string();
    }

    /// Appends to the field's text, as typing or dictation would.
    pub fn append_text(&self, text: &str) {
        self.text.lock().expect("lock poisoned").push_str(text);
    }

    /// Every position passed to `move_to`.
    pub fn positions(&self) -> Vec<Point> {
        self.positions.lock().expect("lock poisoned").clone()
    }
}

impl CompositionTarget for MockCompositionTarget {
    fn text(&self) -> String {
        self.text.lock().expect("lock poisoned").clone()
    }

    fn clear(&self) {
        self.text.lock().expect("lock poisoned").clear();
    }

    fn move_to(&self, position: Point) {
        self.positions.lock().expect("lock poisoned").push(position);
    }
}

// ── Status overlay ────────────────────────────────────────────────────────────

/// What the status overlay currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayState {
    pub visible: bool,
    pub text: String,
    /// Whether the error style is applied.
    pub error: bool,
    /// Opacity of the display underneath the overlay.
    pub display_opacity: f64,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            visible: false,
            text: String::new(),
            error: false,
            display_opacity: 1.0,
        }
    }
}

/// Opacity of the display while an error is shown.
pub const ERROR_DISPLAY_OPACITY: f64 = 0.1;

/// A status overlay that records its presentation state.
pub struct RecordingStatusView {
    state: Mutex<OverlayState>,
    dialog: Size,
    placements: Mutex<Vec<Point>>,
}

impl RecordingStatusView {
    /// An overlay whose dialog renders at `dialog` size.
    pub fn new(dialog: Size) -> Self {
        Self {
            state: Mutex::new(OverlayState::default()),
            dialog,
            placements: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state.lock().expect("lock poisoned").clone()
    }

    /// Every position passed to `place_dialog`.
    pub fn placements(&self) -> Vec<Point> {
        self.placements.lock().expect("lock poisoned").clone()
    }
}

impl Default for RecordingStatusView {
    fn default() -> Self {
        Self::new(Size::new(300.0, 80.0))
    }
}

impl StatusView for RecordingStatusView {
    fn show_status(&self, text: &str) {
        *self.state.lock().expect("lock poisoned") = OverlayState {
            visible: true,
            text: text.to_string(),
            error: false,
            display_opacity: 1.0,
        };
    }

    fn hide_status(&self) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.visible = false;
        state.error = false;
        state.display_opacity = 1.0;
    }

    fn show_error(&self, text: &str) {
        *self.state.lock().expect("lock poisoned") = OverlayState {
            visible: true,
            text: text.to_string(),
            error: true,
            display_opacity: ERROR_DISPLAY_OPACITY,
        };
    }

    fn dialog_size(&self) -> Size {
        self.dialog
    }

    fn place_dialog(&self, position: Point) {
        self.placements.lock().expect("lock poisoned").push(position);
    }
}

// ── Title ─────────────────────────────────────────────────────────────────────

/// A window title that records every value it was set to.
#[derive(Default)]
pub struct RecordingTitle {
    titles: Mutex<Vec<String>>,
}

impl RecordingTitle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent title, if one was ever set.
    pub fn current(&self) -> Option<String> {
        self.titles.lock().expect("lock poisoned").last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.titles.lock().expect("lock poisoned").clone()
    }
}

impl TitleSink for RecordingTitle {
    fn set_title(&self, title: &str) {
        self.titles
            .lock()
            .expect("lock poisoned")
            .push(title.to_string());
    }
}

// ── Clipboard ─────────────────────────────────────────────────────────────────

/// A clipboard receiver, optionally detached to model a missing parent window.
pub struct RecordingClipboard {
    attached: bool,
    received: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    /// A receiver attached to a parent context.
    pub fn attached() -> Self {
        Self {
            attached: true,
            received: Mutex::new(Vec::new()),
        }
    }

    /// A receiver with no parent context; every hand-off fails.
    pub fn detached() -> Self {
        Self {
            attached: false,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().expect("lock poisoned").clone()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_clipboard(&self, data: &str) -> Result<(), ClipboardError> {
        if !self.attached {
            return Err(ClipboardError::NoReceiver);
        }
        self.received
            .lock()
            .expect("lock poisoned")
            .push(data.to_string());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
