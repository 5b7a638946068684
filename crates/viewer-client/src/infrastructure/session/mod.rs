//! Session object adapters.
//!
//! The live session object is provided by the page; this crate only ships the
//! recording double used by tests and `viewer-replay`.

pub mod mock;
