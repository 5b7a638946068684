//! The session object as seen by the controller.
//!
//! The session object owns the remote-desktop protocol connection and the
//! rendered display.  The controller only needs the narrow surface below;
//! protocol handling and painting stay on the other side of this trait.

use thiserror::Error;
use viewer_core::{Keysym, PointerState, ScaleFactor};

/// A flattened RGBA snapshot of the rendered display.
pub type Snapshot = image::RgbaImage;

/// Error type for session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session is no longer connected; outbound events are dropped.
    #[error("session is closed")]
    Closed,
    /// The display could not be flattened into a snapshot.
    #[error("snapshot failed: {0}")]
    Snapshot(String),
}

/// Operations the controller invokes on the session object.
///
/// Infrastructure wraps the live session; tests use
/// [`crate::infrastructure::session::mock::RecordingSession`].
pub trait RemoteSession: Send + Sync {
    /// Sends a pointer state in remote display coordinates.
    fn send_mouse_state(&self, state: PointerState) -> Result<(), SessionError>;

    /// Sends a key press (`pressed = true`) or release.
    fn send_key_event(&self, pressed: bool, keysym: Keysym) -> Result<(), SessionError>;

    /// Tells the remote host the viewer's window size.
    fn send_size(&self, width: u32, height: u32) -> Result<(), SessionError>;

    /// The current render scale.
    ///
    /// The session object guarantees this is finite and `> 0` whenever it is
    /// queried; the controller still validates it before dividing.
    fn scale(&self) -> f64;

    /// Applies a new render scale.
    fn set_scale(&self, scale: ScaleFactor);

    /// Remote framebuffer width in remote pixels.
    fn width(&self) -> u32;

    /// Remote framebuffer height in remote pixels.
    fn height(&self) -> u32;

    /// Flattens all display layers into one raster.
    fn flatten(&self) -> Result<Snapshot, SessionError>;

    /// Closes the connection.  Idempotent.
    fn disconnect(&self);
}
