//! The viewer facade: owns every component and routes inbound events.
//!
//! The host delivers each callback as one [`ViewerEvent`] to
//! [`Viewer::dispatch`].  Each call runs to completion before the next, so
//! the components need no locking of their own state.  `dispatch` never
//! fails; every error path is absorbed and logged by the component that owns
//! it.

use std::sync::Arc;

use tracing::{debug, info};
use viewer_core::PointerState;

use crate::domain::events::{SessionNotification, ViewerEvent};

use super::context::ViewerContext;
use super::host::{CompositionTarget, Viewport};
use super::keyboard_gate::{KeyDisposition, KeyboardGate};
use super::lifecycle::SessionLifecycleCoordinator;
use super::text_composition::TextCompositionBridge;
use super::translate_pointer::PointerTranslator;

/// What [`Viewer::dispatch`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// The event was handled; there is nothing further to report.
    Handled,
    /// A pointer event was sent to the session in remote coordinates.
    PointerForwarded(PointerState),
    /// A pointer event could not be sent.
    PointerDropped,
    /// A key event's disposition.  The host uses it to decide whether the
    /// event may also reach the composition target.
    Key(KeyDisposition),
    /// Number of characters typed from composed text.
    Composed(usize),
}

/// The session controller bound to one session object and one page.
pub struct Viewer {
    pointer: PointerTranslator,
    keyboard: KeyboardGate,
    composition: TextCompositionBridge,
    lifecycle: SessionLifecycleCoordinator,
    viewport: Arc<dyn Viewport>,
    composition_target: Arc<dyn CompositionTarget>,
}

impl Viewer {
    /// Wires every component to `ctx`.  The keyboard starts enabled and the
    /// initial title is published.
    pub fn attach(ctx: ViewerContext) -> Self {
        info!(?ctx, "attaching viewer");
        let viewer = Self {
            pointer: PointerTranslator::new(Arc::clone(&ctx.session), Arc::clone(&ctx.viewport)),
            keyboard: KeyboardGate::new(Arc::clone(&ctx.session)),
            composition: TextCompositionBridge::new(
                Arc::clone(&ctx.session),
                Arc::clone(&ctx.composition_target),
            ),
            lifecycle: SessionLifecycleCoordinator::new(&ctx),
            viewport: Arc::clone(&ctx.viewport),
            composition_target: Arc::clone(&ctx.composition_target),
        };
        viewer.lifecycle.publish_title();
        viewer
    }

    pub fn dispatch(&mut self, event: ViewerEvent) -> Dispatch {
        debug!(?event, "dispatch");
        match event {
            ViewerEvent::Pointer(input) => match self.pointer.handle(input) {
                Ok(sent) => Dispatch::PointerForwarded(sent),
                Err(e) => {
                    debug!("pointer event dropped: {e}");
                    Dispatch::PointerDropped
                }
            },
            ViewerEvent::KeyDown { keysym } => {
                Dispatch::Key(self.keyboard.key_down(keysym, self.composition.is_focused()))
            }
            ViewerEvent::KeyUp { keysym } => {
                Dispatch::Key(self.keyboard.key_up(keysym, self.composition.is_focused()))
            }
            ViewerEvent::FocusGained => {
                self.composition.on_focus();
                Dispatch::Handled
            }
            ViewerEvent::FocusLost => {
                self.composition.on_blur();
                Dispatch::Handled
            }
            ViewerEvent::TextInput => Dispatch::Composed(self.composition.on_input(&self.keyboard)),
            ViewerEvent::Scroll => {
                let offset = self.viewport.metrics().scroll_offset();
                self.composition_target.move_to(offset);
                self.lifecycle.recenter_status();
                Dispatch::Handled
            }
            ViewerEvent::WindowResize => {
                self.lifecycle.on_window_resize();
                Dispatch::Handled
            }
            ViewerEvent::WindowTeardown => {
                self.lifecycle.on_teardown();
                Dispatch::Handled
            }
            ViewerEvent::Session { notification } => {
                self.on_notification(notification);
                Dispatch::Handled
            }
        }
    }

    pub fn keyboard(&self) -> &KeyboardGate {
        &self.keyboard
    }

    /// Mutable access for enabling and disabling the keyboard.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardGate {
        &mut self.keyboard
    }

    pub fn lifecycle(&self) -> &SessionLifecycleCoordinator {
        &self.lifecycle
    }

    pub fn composition(&self) -> &TextCompositionBridge {
        &self.composition
    }

    fn on_notification(&mut self, notification: SessionNotification) {
        match notification {
            SessionNotification::StateChange { code } => self.lifecycle.on_state_change(code),
            SessionNotification::Rename { name } => self.lifecycle.on_rename(&name),
            SessionNotification::Error { message } => self.lifecycle.on_error(&message),
            SessionNotification::Resize { width, height } => {
                self.lifecycle.on_remote_resize(width, height)
            }
            SessionNotification::Clipboard { data } => self.lifecycle.on_clipboard(&data),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
