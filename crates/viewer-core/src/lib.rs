//! # viewer-core
//!
//! Pure rules for the remote-display viewer: how pointer positions are
//! translated into the remote display's coordinate space, how characters
//! become keysyms, how session lifecycle codes map to status text and window
//! titles, and how cached thumbnails are sized and stored.
//!
//! This crate has zero dependencies on a UI host, an async runtime, or the
//! session object itself.  The `viewer-client` crate wires these rules to the
//! live collaborators.
//!
//! # Architecture overview (for beginners)
//!
//! A remote-display viewer shows the framebuffer of a remote machine inside a
//! scrollable page.  The user's mouse, touch, and keyboard input must be
//! converted into events the remote machine understands:
//!
//! - **`domain`** – Geometry (viewport-relative positions, dead-zone
//!   auto-scroll, scale correction), the session lifecycle state table, the
//!   window title rule, and the thumbnail store.
//!
//! - **`keymap`** – The keysym encoding: converting Unicode code points to
//!   keysyms and classifying which keysyms produce text locally.

pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `viewer_core::PointerState` instead of `viewer_core::domain::pointer::PointerState`.
pub use domain::geometry::{centered_position, Point, Size, ViewportMetrics};
pub use domain::pointer::{
    auto_scroll_delta, scale_to_remote, view_relative_position, GeometryError, PointerState,
    ScaleFactor,
};
pub use domain::session_id::session_id_from_query;
pub use domain::session_state::{PrefixUpdate, SessionState, StatusDisplay};
pub use domain::thumbnail::{thumbnail_dimensions, ThumbnailStore};
pub use domain::title::TitleContext;
pub use keymap::keysym::Keysym;
