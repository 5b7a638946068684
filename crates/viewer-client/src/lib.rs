//! viewer-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the `viewer-replay` binary share the same module tree.
//!
//! # What does viewer-client do? (for beginners)
//!
//! A remote-display viewer page hosts a *session object* that speaks the
//! remote-desktop protocol and paints the remote framebuffer.  This crate is
//! the controller that sits between that session object and the user:
//!
//! 1. Mouse and touch events are converted into remote pointer events: the
//!    page auto-scrolls to keep the pointer visible, and positions are divided
//!    by the render scale so they land on the right remote pixel.
//! 2. Key events are always forwarded to the remote session; only typable keys
//!    pressed while the hidden text field has focus also reach local text
//!    composition.
//! 3. Text that appears in the hidden field without a key press (voice input,
//!    on-screen keyboards) is replayed as synthetic key presses.
//! 4. Session lifecycle notifications drive the status overlay, the window
//!    title, and a periodic thumbnail capture for the session picker.
//!
//! # Layers
//!
//! ```text
//! domain/          ViewerConfig, ViewerEvent (pure data)
//! application/     Collaborator traits, the components, thumbnail encoding, Viewer facade
//! infrastructure/  Storage, timers, config files, replay driver, recording mocks
//! ```

/// Domain layer: configuration and inbound event types.
pub mod domain;

/// Application layer: input translation, keyboard capture, lifecycle coordination.
pub mod application;

/// Infrastructure layer: storage, timers, config, replay, and test doubles.
pub mod infrastructure;

pub use application::context::ViewerContext;
pub use application::viewer::{Dispatch, Viewer};
pub use domain::config::ViewerConfig;
pub use domain::events::{PointerInput, PointerSource, SessionNotification, ViewerEvent};
