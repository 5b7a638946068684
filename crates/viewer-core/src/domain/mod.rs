//! Domain rules for the remote-display viewer.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of a clean architecture holds the rules that make the
//! system what it is.  Here that means: where a pointer sits relative to the
//! visible viewport, how far the page must scroll to keep it visible, how a
//! raw position is scaled into remote display pixels, which status text a
//! lifecycle code produces, and how thumbnails are merged into the store.
//!
//! Nothing in here touches a window, a timer, or the session object, so all of
//! it can be unit-tested on any platform without setup.

/// Element centering and viewport metrics.
pub mod geometry;

/// Pointer state, dead-zone auto-scroll, and scale correction.
pub mod pointer;

/// Session identifier parsing from the page query string.
pub mod session_id;

/// Session lifecycle codes and their status/title side effects.
pub mod session_state;

/// Thumbnail sizing and the persisted session → thumbnail mapping.
pub mod thumbnail;

/// Window title composition.
pub mod title;
