//! SessionLifecycleCoordinator: reacts to session notifications.
//!
//! # State machine (for beginners)
//!
//! The session object reports lifecycle changes as integer codes.  The
//! coordinator never invents transitions; it only mirrors what it is told:
//!
//! ```text
//!   Idle ──► Connecting ──► WaitingForUpdate ──► Connected ──► Disconnecting ──► Disconnected
//!                                                   │
//!                                                   └── thumbnail timer runs only here
//! ```
//!
//! Each state decides three things: the status overlay text (or hiding it),
//! the window-title prefix, and whether periodic thumbnail capture is running.
//! Unknown codes show a generic status and keep the previous prefix.
//!
//! Besides state changes the coordinator handles rename, error, remote resize,
//! clipboard data, and the ambient window resize, scroll, and teardown events.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use viewer_core::{
    centered_position, PrefixUpdate, ScaleFactor, SessionState, StatusDisplay, TitleContext,
};

use super::context::ViewerContext;
use super::host::{ClipboardSink, StatusView, TitleSink, Viewport};
use super::session::RemoteSession;
use super::thumbnail_cache::ThumbnailCache;
use super::timer::{TimerHandle, TimerScheduler};

/// Drives status, title, scale, and thumbnail capture from session events.
pub struct SessionLifecycleCoordinator {
    session: Arc<dyn RemoteSession>,
    viewport: Arc<dyn Viewport>,
    status: Arc<dyn StatusView>,
    title_sink: Arc<dyn TitleSink>,
    clipboard: Arc<dyn ClipboardSink>,
    timers: Arc<dyn TimerScheduler>,
    /// `None` when durable storage is unavailable.
    thumbnails: Option<ThumbnailCache>,
    capture_period: Duration,
    state: SessionState,
    title: TitleContext,
    capture_timer: Option<TimerHandle>,
}

impl SessionLifecycleCoordinator {
    pub fn new(ctx: &ViewerContext) -> Self {
        let thumbnails = ctx.storage.as_ref().map(|storage| {
            ThumbnailCache::new(
                Arc::clone(&ctx.session),
                Arc::clone(storage),
                ctx.session_id.clone(),
                &ctx.config,
            )
        });

        Self {
            session: Arc::clone(&ctx.session),
            viewport: Arc::clone(&ctx.viewport),
            status: Arc::clone(&ctx.status),
            title_sink: Arc::clone(&ctx.title),
            clipboard: Arc::clone(&ctx.clipboard),
            timers: Arc::clone(&ctx.timers),
            thumbnails,
            capture_period: ctx.config.thumbnail_interval(),
            state: SessionState::Idle,
            title: TitleContext::new(ctx.config.initial_connection_name()),
            capture_timer: None,
        }
    }

    /// The most recently reported state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The title derived from the current prefix and connection name.
    pub fn title(&self) -> Option<String> {
        self.title.title()
    }

    /// Whether the periodic thumbnail timer is running.
    pub fn is_capturing(&self) -> bool {
        self.capture_timer.is_some()
    }

    /// Writes the current title to the title sink.  An empty title is not
    /// written.
    pub fn publish_title(&self) {
        if let Some(title) = self.title.title() {
            self.title_sink.set_title(&title);
        }
    }

    // ── Session notifications ─────────────────────────────────────────────────

    pub fn on_state_change(&mut self, code: i32) {
        let state = SessionState::from_code(code);
        if let SessionState::Unknown(raw) = state {
            warn!(code = raw, "unrecognized session state");
        }
        info!(from = ?self.state, to = ?state, "session state changed");
        self.state = state;

        match state.status() {
            StatusDisplay::Show(text) => {
                self.status.show_status(text);
                self.recenter_status();
            }
            StatusDisplay::Hide => self.status.hide_status(),
        }

        let prefix = state.title_prefix();
        if prefix == PrefixUpdate::Keep {
            debug!("title prefix unchanged");
        }
        self.title.apply_prefix(prefix);
        self.publish_title();

        if state.is_connected() {
            self.start_capture();
        } else {
            self.stop_capture();
        }
    }

    pub fn on_rename(&mut self, name: &str) {
        info!(name, "connection renamed");
        self.title.set_connection_name(name);
        self.publish_title();
    }

    /// Disconnects and shows `message` as a blocking error.  No retry.
    pub fn on_error(&mut self, message: &str) {
        warn!(message, "session error; disconnecting");
        self.stop_capture();
        self.session.disconnect();
        self.status.show_error(message);
        self.recenter_status();
    }

    /// Fits a `width`×`height` remote display into the window.
    pub fn on_remote_resize(&self, width: u32, height: u32) {
        debug!(width, height, "remote display resized");
        self.apply_fit_scale(width, height);
    }

    /// Hands clipboard data to the parent context.
    pub fn on_clipboard(&self, data: &str) {
        match self.clipboard.set_clipboard(data) {
            Ok(()) => debug!(len = data.len(), "clipboard handed off"),
            Err(e) => warn!("clipboard data dropped: {e}"),
        }
    }

    // ── Ambient window events ─────────────────────────────────────────────────

    /// Reports the new window size to the session, then refits the display.
    pub fn on_window_resize(&self) {
        let window = self.viewport.window_size();
        let (width, height) = (to_pixels(window.width), to_pixels(window.height));
        if let Err(e) = self.session.send_size(width, height) {
            warn!(width, height, "window size not delivered: {e}");
        }
        self.apply_fit_scale(self.session.width(), self.session.height());
        self.recenter_status();
    }

    /// Final capture (when storage is available), then disconnect.
    pub fn on_teardown(&mut self) {
        info!("window teardown");
        self.stop_capture();
        if let Some(cache) = &self.thumbnails {
            cache.capture_logged();
        }
        self.session.disconnect();
    }

    /// Keeps the status dialog centered in the visible viewport.
    pub fn recenter_status(&self) {
        let position = centered_position(&self.viewport.metrics(), self.status.dialog_size());
        self.status.place_dialog(position);
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn apply_fit_scale(&self, width: u32, height: u32) {
        match ScaleFactor::fit_to_window(self.viewport.window_size(), width, height) {
            Ok(scale) => {
                debug!(scale = scale.get(), "applying fit-to-window scale");
                self.session.set_scale(scale);
            }
            Err(e) => warn!("scale left unchanged: {e}"),
        }
    }

    fn start_capture(&mut self) {
        let Some(cache) = self.thumbnails.clone() else {
            debug!("durable storage unavailable; thumbnails disabled");
            return;
        };
        // Replacing the handle cancels any timer from an earlier connect.
        self.stop_capture();
        self.capture_timer = Some(self.timers.schedule_repeating(
            self.capture_period,
            Box::new(move || cache.capture_logged()),
        ));
        info!(period = ?self.capture_period, "thumbnail capture started");
    }

    fn stop_capture(&mut self) {
        if let Some(timer) = self.capture_timer.take() {
            timer.cancel();
            info!("thumbnail capture stopped");
        }
    }
}

/// Converts a window extent in CSS pixels to whole device pixels.
fn to_pixels(extent: f64) -> u32 {
    extent.max(0.0).round() as u32
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::storage::DurableStorage;
    use crate::domain::config::ViewerConfig;
    use crate::infrastructure::session::mock::RecordingSession;
    use crate::infrastructure::storage::memory::MemoryStorage;
    use crate::infrastructure::timer::manual::ManualScheduler;
    use crate::infrastructure::ui::mock::{
        MockCompositionTarget, RecordingClipboard, RecordingStatusView, RecordingTitle,
        RecordingViewport,
    };
    use viewer_core::{Point, Size};

    struct Fixture {
        session: Arc<RecordingSession>,
        viewport: Arc<RecordingViewport>,
        status: Arc<RecordingStatusView>,
        title: Arc<RecordingTitle>,
        clipboard: Arc<RecordingClipboard>,
        timers: Arc<ManualScheduler>,
        storage: Arc<MemoryStorage>,
        coordinator: SessionLifecycleCoordinator,
    }

    fn fixture_with(storage_available: bool, clipboard: RecordingClipboard) -> Fixture {
        let session = Arc::new(RecordingSession::new(1024, 768));
        let viewport = Arc::new(RecordingViewport::new(800.0, 600.0));
        let status = Arc::new(RecordingStatusView::new(Size::new(200.0, 100.0)));
        let title = Arc::new(RecordingTitle::new());
        let clipboard = Arc::new(clipboard);
        let timers = Arc::new(ManualScheduler::new());
        let storage = Arc::new(MemoryStorage::new());
        let ctx = ViewerContext {
            session: session.clone(),
            viewport: viewport.clone(),
            composition_target: Arc::new(MockCompositionTarget::new()),
            status: status.clone(),
            title: title.clone(),
            clipboard: clipboard.clone(),
            storage: storage_available.then(|| storage.clone() as Arc<dyn DurableStorage>),
            timers: timers.clone(),
            session_id: "abc".to_string(),
            config: ViewerConfig::default(),
        };
        let coordinator = SessionLifecycleCoordinator::new(&ctx);
        Fixture {
            session,
            viewport,
            status,
            title,
            clipboard,
            timers,
            storage,
            coordinator,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(true, RecordingClipboard::attached())
    }

    // ── State changes ─────────────────────────────────────────────────────────

    #[test]
    fn test_connecting_shows_status_and_prefixes_title() {
        // Arrange
        let mut f = fixture();

        // Act
        f.coordinator.on_state_change(1);

        // Assert
        let overlay = f.status.state();
        assert!(overlay.visible);
        assert_eq!(overlay.text, "Connecting...");
        assert_eq!(
            f.title.current().as_deref(),
            Some("[Connecting...] Remote Display")
        );
        assert_eq!(f.coordinator.state(), SessionState::Connecting);
    }

    #[test]
    fn test_status_dialog_is_centered_in_viewport() {
        let mut f = fixture();
        f.viewport.set_scroll(Point::new(0.0, 50.0));

        f.coordinator.on_state_change(0);

        // ((800 - 200) / 2, (600 - 100) / 2 + 50)
        assert_eq!(f.status.placements(), vec![Point::new(300.0, 300.0)]);
    }

    #[test]
    fn test_connected_hides_status_clears_prefix_and_starts_capture() {
        // Arrange
        let mut f = fixture();
        f.coordinator.on_state_change(2);

        // Act
        f.coordinator.on_state_change(3);

        // Assert
        assert!(!f.status.state().visible);
        assert_eq!(f.title.current().as_deref(), Some("Remote Display"));
        assert!(f.coordinator.is_capturing());
        assert_eq!(f.timers.periods(), vec![Duration::from_secs(5)]);

        f.timers.fire_all();
        assert!(f.storage.get_item("VIEWER_THUMBNAILS").unwrap().is_some());
    }

    #[test]
    fn test_connected_without_storage_does_not_schedule_capture() {
        let mut f = fixture_with(false, RecordingClipboard::attached());

        f.coordinator.on_state_change(3);

        assert!(!f.coordinator.is_capturing());
        assert_eq!(f.timers.scheduled_count(), 0);
    }

    #[test]
    fn test_leaving_connected_cancels_capture() {
        let mut f = fixture();
        f.coordinator.on_state_change(3);

        f.coordinator.on_state_change(4);

        assert!(!f.coordinator.is_capturing());
        assert_eq!(f.timers.active_count(), 0);
        assert_eq!(f.timers.fire_all(), 0);
    }

    #[test]
    fn test_reconnect_replaces_timer_instead_of_stacking() {
        let mut f = fixture();

        f.coordinator.on_state_change(3);
        f.coordinator.on_state_change(3);

        assert_eq!(f.timers.scheduled_count(), 2);
        assert_eq!(f.timers.active_count(), 1);
    }

    #[test]
    fn test_disconnected_shows_status_and_prefix() {
        let mut f = fixture();
        f.coordinator.on_rename("Lab1");

        f.coordinator.on_state_change(5);

        assert_eq!(f.status.state().text, "Disconnected.");
        assert_eq!(f.title.current().as_deref(), Some("[Disconnected] Lab1"));
    }

    #[test]
    fn test_unknown_code_shows_generic_status_and_keeps_prefix() {
        // Arrange
        let mut f = fixture();
        f.coordinator.on_state_change(1);

        // Act
        f.coordinator.on_state_change(42);

        // Assert
        assert_eq!(f.status.state().text, "[UNKNOWN STATUS]");
        assert_eq!(
            f.title.current().as_deref(),
            Some("[Connecting...] Remote Display")
        );
        assert_eq!(f.coordinator.state(), SessionState::Unknown(42));
    }

    #[test]
    fn test_waiting_state_uses_waiting_prefix() {
        let mut f = fixture();

        f.coordinator.on_state_change(2);

        assert_eq!(
            f.status.state().text,
            "Connected, waiting for first update..."
        );
        assert_eq!(
            f.title.current().as_deref(),
            Some("[Waiting...] Remote Display")
        );
    }

    // ── Rename / error / resize / clipboard ───────────────────────────────────

    #[test]
    fn test_rename_updates_title_without_changing_state() {
        let mut f = fixture();
        f.coordinator.on_state_change(1);

        f.coordinator.on_rename("Lab1");

        assert_eq!(f.title.current().as_deref(), Some("[Connecting...] Lab1"));
        assert_eq!(f.coordinator.state(), SessionState::Connecting);
    }

    #[test]
    fn test_error_disconnects_shows_error_and_stops_capture() {
        // Arrange
        let mut f = fixture();
        f.coordinator.on_state_change(3);

        // Act
        f.coordinator.on_error("Server error");

        // Assert
        assert!(f.session.is_closed());
        let overlay = f.status.state();
        assert!(overlay.error);
        assert_eq!(overlay.text, "Server error");
        assert!(overlay.display_opacity < 1.0);
        assert_eq!(f.timers.active_count(), 0);
    }

    #[test]
    fn test_remote_resize_applies_fit_scale() {
        let f = fixture();

        // min(800 / 1600, 600 / 600) = 0.5
        f.coordinator.on_remote_resize(1600, 600);

        assert_eq!(f.session.applied_scales(), vec![0.5]);
    }

    #[test]
    fn test_zero_sized_remote_resize_leaves_scale_unchanged() {
        let f = fixture();

        f.coordinator.on_remote_resize(0, 768);

        assert!(f.session.applied_scales().is_empty());
    }

    #[test]
    fn test_window_resize_sends_size_then_refits_with_session_dimensions() {
        // Arrange
        let f = fixture();
        f.viewport.set_window_size(Size::new(512.0, 768.0));

        // Act
        f.coordinator.on_window_resize();

        // Assert: min(512 / 1024, 768 / 768) = 0.5
        assert_eq!(f.session.sizes(), vec![(512, 768)]);
        assert_eq!(f.session.applied_scales(), vec![0.5]);
        assert_eq!(f.status.placements().len(), 1);
    }

    #[test]
    fn test_clipboard_is_forwarded_verbatim() {
        let f = fixture();

        f.coordinator.on_clipboard("copied text");

        assert_eq!(f.clipboard.received(), vec!["copied text".to_string()]);
    }

    #[test]
    fn test_clipboard_without_receiver_is_absorbed() {
        let f = fixture_with(true, RecordingClipboard::detached());

        f.coordinator.on_clipboard("copied text");

        assert!(f.clipboard.received().is_empty());
    }

    // ── Teardown ──────────────────────────────────────────────────────────────

    #[test]
    fn test_teardown_captures_once_then_disconnects() {
        // Arrange
        let mut f = fixture();
        f.coordinator.on_state_change(3);

        // Act
        f.coordinator.on_teardown();

        // Assert
        assert_eq!(f.session.flatten_calls(), 1);
        assert_eq!(f.session.disconnect_count(), 1);
        assert_eq!(f.timers.active_count(), 0);
        assert!(f.storage.get_item("VIEWER_THUMBNAILS").unwrap().is_some());
    }

    #[test]
    fn test_teardown_without_storage_only_disconnects() {
        let mut f = fixture_with(false, RecordingClipboard::attached());

        f.coordinator.on_teardown();

        assert_eq!(f.session.flatten_calls(), 0);
        assert_eq!(f.session.disconnect_count(), 1);
    }
}
