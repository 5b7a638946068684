//! TextCompositionBridge: types out text that appears in the composition
//! target without passing through the keyboard.
//!
//! Voice input, on-screen keyboards, and other assistive tools insert text
//! directly into the hidden field.  The bridge notices the field growing and
//! sends a press/release pair for every appended character.
//!
//! Only net insertions are handled.  A shorter or equal-length value is a
//! deletion or replacement and sends nothing.  Lengths are counted in `char`s.

use std::sync::Arc;

use tracing::{debug, warn};
use viewer_core::Keysym;

use super::host::CompositionTarget;
use super::keyboard_gate::KeyboardGate;
use super::session::{RemoteSession, SessionError};

/// Watches the composition target and synthesizes key events for inserted text.
pub struct TextCompositionBridge {
    session: Arc<dyn RemoteSession>,
    target: Arc<dyn CompositionTarget>,
    focused: bool,
    tracked_len: usize,
}

impl TextCompositionBridge {
    /// Starts tracking from the target's current text.
    pub fn new(session: Arc<dyn RemoteSession>, target: Arc<dyn CompositionTarget>) -> Self {
        let tracked_len = target.text().chars().count();
        Self {
            session,
            target,
            focused: false,
            tracked_len,
        }
    }

    /// Whether the composition target holds input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The target gained focus: it is emptied and tracking restarts at zero.
    pub fn on_focus(&mut self) {
        self.focused = true;
        self.target.clear();
        self.tracked_len = 0;
    }

    pub fn on_blur(&mut self) {
        self.focused = false;
    }

    /// The target's text changed.  Returns how many characters were typed.
    ///
    /// A character whose keysym `gate` reports as held down is skipped; a
    /// physical key is already producing it.
    pub fn on_input(&mut self, gate: &KeyboardGate) -> usize {
        let text = self.target.text();
        let old_len = self.tracked_len;
        self.tracked_len = text.chars().count();

        if self.tracked_len <= old_len {
            debug!(old_len, new_len = self.tracked_len, "composition shrank; ignoring");
            return 0;
        }

        let mut typed = 0;
        for ch in text.chars().skip(old_len) {
            let keysym = Keysym::from_char(ch);
            if gate.is_pressed(keysym) {
                debug!(%keysym, "skipping synthesized press for held key");
                continue;
            }
            if let Err(e) = self.type_keysym(keysym) {
                warn!(%keysym, "composed character not delivered: {e}");
                continue;
            }
            typed += 1;
        }
        debug!(typed, "composed text forwarded");
        typed
    }

    fn type_keysym(&self, keysym: Keysym) -> Result<(), SessionError> {
        self.session.send_key_event(true, keysym)?;
        self.session.send_key_event(false, keysym)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::session::mock::RecordingSession;
    use crate::infrastructure::ui::mock::MockCompositionTarget;

    struct Fixture {
        session: Arc<RecordingSession>,
        target: Arc<MockCompositionTarget>,
        gate: KeyboardGate,
        bridge: TextCompositionBridge,
    }

    fn fixture() -> Fixture {
        let session = Arc::new(RecordingSession::new(640, 480));
        let target = Arc::new(MockCompositionTarget::new());
        let gate = KeyboardGate::new(Arc::clone(&session) as Arc<dyn RemoteSession>);
        let bridge = TextCompositionBridge::new(
            Arc::clone(&session) as Arc<dyn RemoteSession>,
            Arc::clone(&target) as Arc<dyn CompositionTarget>,
        );
        Fixture {
            session,
            target,
            gate,
            bridge,
        }
    }

    #[test]
    fn test_inserted_text_is_typed_as_press_release_pairs() {
        // Arrange
        let mut f = fixture();
        f.bridge.on_focus();

        // Act
        f.target.set_text("hi");
        let typed = f.bridge.on_input(&f.gate);

        // Assert
        assert_eq!(typed, 2);
        assert_eq!(
            f.session.key_events(),
            vec![
                (true, Keysym(0x68)),
                (false, Keysym(0x68)),
                (true, Keysym(0x69)),
                (false, Keysym(0x69)),
            ]
        );
    }

    #[test]
    fn test_only_appended_suffix_is_typed() {
        let mut f = fixture();
        f.bridge.on_focus();
        f.target.set_text("ab");
        f.bridge.on_input(&f.gate);

        f.target.append_text("€");
        let typed = f.bridge.on_input(&f.gate);

        assert_eq!(typed, 1);
        let events = f.session.key_events();
        assert_eq!(&events[4..], &[(true, Keysym(0x0100_20AC)), (false, Keysym(0x0100_20AC))]);
    }

    #[test]
    fn test_shortened_text_sends_nothing() {
        // Arrange
        let mut f = fixture();
        f.bridge.on_focus();
        f.target.set_text("abc");
        f.bridge.on_input(&f.gate);
        let sent_before = f.session.key_events().len();

        // Act: delete, then replace with equal length.
        f.target.set_text("ab");
        let deleted = f.bridge.on_input(&f.gate);
        f.target.set_text("xy");
        let replaced = f.bridge.on_input(&f.gate);

        // Assert
        assert_eq!((deleted, replaced), (0, 0));
        assert_eq!(f.session.key_events().len(), sent_before);
    }

    #[test]
    fn test_held_key_is_not_synthesized_again() {
        // Arrange: the user is physically holding 'a'.
        let mut f = fixture();
        f.bridge.on_focus();
        f.gate.key_down(Keysym(0x61), true);

        // Act: the browser inserts "ab" into the field.
        f.target.set_text("ab");
        let typed = f.bridge.on_input(&f.gate);

        // Assert: only 'b' is synthesized.
        assert_eq!(typed, 1);
        assert_eq!(
            f.session.key_events(),
            vec![
                (true, Keysym(0x61)),
                (true, Keysym(0x62)),
                (false, Keysym(0x62)),
            ]
        );
    }

    #[test]
    fn test_focus_clears_target_and_resets_length() {
        let mut f = fixture();
        f.target.set_text("leftover");
        f.bridge.on_focus();
        assert!(f.bridge.is_focused());
        assert_eq!(f.target.text(), "");

        f.target.set_text("x");
        assert_eq!(f.bridge.on_input(&f.gate), 1);

        f.bridge.on_blur();
        assert!(!f.bridge.is_focused());
    }

    #[test]
    fn test_initial_text_is_not_retyped() {
        let session = Arc::new(RecordingSession::new(640, 480));
        let target = Arc::new(MockCompositionTarget::new());
        target.set_text("ab");
        let gate = KeyboardGate::new(Arc::clone(&session) as Arc<dyn RemoteSession>);
        let mut bridge = TextCompositionBridge::new(
            Arc::clone(&session) as Arc<dyn RemoteSession>,
            Arc::clone(&target) as Arc<dyn CompositionTarget>,
        );

        target.append_text("c");
        let typed = bridge.on_input(&gate);

        assert_eq!(typed, 1);
        assert_eq!(session.key_events()[0], (true, Keysym(0x63)));
    }
}
