//! Application layer for the viewer controller.
//!
//! # What lives here?
//!
//! - **Collaborator traits** – what the controller needs from the outside
//!   world: the session object ([`session::RemoteSession`]), the UI host
//!   ([`host`]), durable storage ([`storage::DurableStorage`]), and timers
//!   ([`timer::TimerScheduler`]).  Infrastructure provides implementations;
//!   tests inject recording doubles.
//!
//! - **Components** – one per responsibility:
//!   - [`translate_pointer`] – mouse/touch → remote pointer events with auto-scroll.
//!   - [`keyboard_gate`] – key forwarding and the local-composition decision.
//!   - [`text_composition`] – replays inserted text as synthetic key presses.
//!   - [`lifecycle`] – status overlay, title, resize, error, teardown.
//!   - [`thumbnail_cache`] – snapshot → thumbnail → durable storage.
//!   - [`raster`] – downscaling and PNG data-URL encoding for thumbnails.
//!
//! - **[`viewer::Viewer`]** – the facade that owns all components and routes
//!   each [`crate::ViewerEvent`] to its owner.

pub mod context;
pub mod host;
pub mod keyboard_gate;
pub mod lifecycle;
pub mod raster;
pub mod session;
pub mod storage;
pub mod text_composition;
pub mod thumbnail_cache;
pub mod timer;
pub mod translate_pointer;
pub mod viewer;
