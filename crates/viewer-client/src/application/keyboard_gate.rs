//! KeyboardGate: forwarding policy for physical key events.
//!
//! Every key event is sent to the remote session while the gate is enabled.
//! The only decision the gate makes is whether the event may *also* reach the
//! hidden composition target, which happens when that target has focus and
//! the key produces text locally.
//!
//! The gate owns the set of keys currently held down.  The text-composition
//! bridge consults it so a synthesized press never duplicates a real one.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};
use viewer_core::Keysym;

use super::session::RemoteSession;

/// What happened to a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The gate is disabled; nothing was sent.
    Ignored,
    /// Sent to the session; local composition must not see it.
    ForwardOnly,
    /// Sent to the session and allowed to reach the composition target.
    ForwardAndCompose,
}

impl KeyDisposition {
    /// Whether the host should let the event reach the composition target.
    pub fn allows_composition(self) -> bool {
        matches!(self, Self::ForwardAndCompose)
    }
}

/// Forwards key events and tracks which keys are held.
pub struct KeyboardGate {
    session: Arc<dyn RemoteSession>,
    enabled: bool,
    pressed: HashSet<Keysym>,
}

impl KeyboardGate {
    /// Creates an enabled gate.
    pub fn new(session: Arc<dyn RemoteSession>) -> Self {
        Self {
            session,
            enabled: true,
            pressed: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, keysym: Keysym, focused: bool) -> KeyDisposition {
        self.handle(true, keysym, focused)
    }

    pub fn key_up(&mut self, keysym: Keysym, focused: bool) -> KeyDisposition {
        self.handle(false, keysym, focused)
    }

    /// Stops forwarding.  The pressed set is left as it is.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a forwarded key-down for `keysym` has not yet been released.
    pub fn is_pressed(&self, keysym: Keysym) -> bool {
        self.pressed.contains(&keysym)
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    fn handle(&mut self, pressed: bool, keysym: Keysym, focused: bool) -> KeyDisposition {
        if !self.enabled {
            return KeyDisposition::Ignored;
        }

        match self.session.send_key_event(pressed, keysym) {
            Ok(()) if pressed => {
                self.pressed.insert(keysym);
            }
            Ok(()) => {
                self.pressed.remove(&keysym);
            }
            Err(e) => warn!(%keysym, pressed, "key event not delivered: {e}"),
        }

        let disposition = if focused && keysym.is_typable() {
            KeyDisposition::ForwardAndCompose
        } else {
            KeyDisposition::ForwardOnly
        };
        debug!(%keysym, pressed, ?disposition, "key event");
        disposition
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
