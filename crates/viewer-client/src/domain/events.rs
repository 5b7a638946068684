//! Inbound event vocabulary.
//!
//! Every callback the UI host or the session object can deliver is one
//! [`ViewerEvent`].  The [`crate::Viewer`] facade routes each event to the
//! component that owns it, so components never register host callbacks
//! themselves and can be driven directly from tests.
//!
//! # JSON representation
//!
//! Events are internally tagged with a `"type"` field, which is also the
//! format of `viewer-replay` scripts:
//!
//! ```json
//! {"type":"Pointer","source":"Touch","state":{"x":10.0,"y":20.0,"left":true}}
//! {"type":"KeyDown","keysym":65}
//! {"type":"Session","notification":{"kind":"StateChange","code":3}}
//! ```

use serde::{Deserialize, Serialize};
use viewer_core::{Keysym, PointerState};

/// Which input device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerSource {
    #[default]
    Mouse,
    /// A touchpad-style emulated mouse driven by touch gestures.
    Touch,
}

/// A raw pointer state change from mouse or touch input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerInput {
    #[serde(default)]
    pub source: PointerSource,
    /// Position in display-local (on-screen, scaled) coordinates.
    pub state: PointerState,
}

/// Notifications emitted by the session object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SessionNotification {
    /// The session changed lifecycle state; see [`viewer_core::SessionState`].
    StateChange { code: i32 },
    /// The remote host announced its connection name.
    Rename { name: String },
    /// The session failed.
    Error { message: String },
    /// The remote framebuffer changed size.
    Resize { width: u32, height: u32 },
    /// The remote host placed data on its clipboard.
    Clipboard { data: String },
}

/// Every event the viewer controller reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewerEvent {
    /// Mouse or touch state changed (move, press, release).
    Pointer(PointerInput),
    KeyDown { keysym: Keysym },
    KeyUp { keysym: Keysym },
    /// The hidden composition target gained input focus.
    FocusGained,
    /// The hidden composition target lost input focus.
    FocusLost,
    /// The composition target's text changed.
    TextInput,
    /// The page scrolled.
    Scroll,
    /// The browser window changed size.
    WindowResize,
    /// The page is being unloaded.
    WindowTeardown,
    /// A notification from the session object.
    Session { notification: SessionNotification },
}

impl From<SessionNotification> for ViewerEvent {
    fn from(notification: SessionNotification) -> Self {
        ViewerEvent::Session { notification }
    }
}

impl From<PointerInput> for ViewerEvent {
    fn from(input: PointerInput) -> Self {
        ViewerEvent::Pointer(input)
    }
}
