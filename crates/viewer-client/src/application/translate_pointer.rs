//! PointerTranslator: turns raw mouse and touch state into remote mouse events.
//!
//! # Pipeline (for beginners)
//!
//! Mouse and touch input arrive in *display-local* coordinates: pixels inside
//! the on-screen display element, which may be drawn larger or smaller than
//! the remote framebuffer.  Each event goes through the same steps:
//!
//! ```text
//!  local (x, y)
//!      │  + element offset − scroll offset
//!      ▼
//!  view-relative position ──► auto-scroll delta ──► Viewport::scroll_by
//!      │
//!      │  ÷ session scale
//!      ▼
//!  remote (x, y) ──► RemoteSession::send_mouse_state
//! ```
//!
//! Viewport metrics are read fresh on every event; the user may have scrolled
//! between two pointer moves.  Exactly one remote event is sent per input
//! event.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use viewer_core::{
    auto_scroll_delta, scale_to_remote, view_relative_position, GeometryError, Point,
    PointerState, ScaleFactor,
};

use crate::domain::events::PointerInput;

use super::host::Viewport;
use super::session::{RemoteSession, SessionError};

/// Error type for pointer translation.
#[derive(Debug, Error, PartialEq)]
pub enum TranslateError {
    /// The session reported a scale that cannot be divided by.
    #[error("session reported an unusable scale: {0}")]
    InvalidScale(#[from] GeometryError),

    /// The session refused the mouse event.
    #[error("failed to send mouse state: {0}")]
    Session(#[from] SessionError),
}

/// Translates pointer input and forwards it to the session.
pub struct PointerTranslator {
    session: Arc<dyn RemoteSession>,
    viewport: Arc<dyn Viewport>,
}

impl PointerTranslator {
    pub fn new(session: Arc<dyn RemoteSession>, viewport: Arc<dyn Viewport>) -> Self {
        Self { session, viewport }
    }

    /// Handles one pointer state change and returns the state sent to the
    /// session.
    ///
    /// Auto-scroll is applied before the scale is read; a scroll request is
    /// issued only when the delta is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::InvalidScale`] if the session's scale is not
    /// a positive finite number (nothing is sent), and
    /// [`TranslateError::Session`] if the send fails.
    pub fn handle(&self, input: PointerInput) -> Result<PointerState, TranslateError> {
        let metrics = self.viewport.metrics();
        let relative = view_relative_position(
            input.state.position(),
            self.viewport.display_offset(),
            &metrics,
        );

        let delta = auto_scroll_delta(relative, &metrics);
        if delta != Point::default() {
            debug!(dx = delta.x, dy = delta.y, "auto-scrolling to follow pointer");
            self.viewport.scroll_by(delta);
        }

        let raw_scale = self.session.scale();
        let scale = ScaleFactor::new(raw_scale).map_err(|e| {
            warn!("dropping pointer event: {e}");
            e
        })?;

        let remote = scale_to_remote(input.state, scale);
        debug!(
            source = ?input.source,
            x = remote.x,
            y = remote.y,
            "forwarding pointer state"
        );
        self.session.send_mouse_state(remote)?;
        Ok(remote)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
