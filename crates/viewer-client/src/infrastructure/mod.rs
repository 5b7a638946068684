//! Infrastructure layer for the viewer controller.
//!
//! Contains implementations of the application-layer collaborator traits.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`, and
//! `viewer_core`, but MUST NOT be imported by the `application` or domain
//! layers outside of their tests.
//!
//! # Sub-modules
//!
//! - **`config`** – Loads and saves [`crate::ViewerConfig`] as TOML.
//! - **`replay`** – Drives a [`crate::Viewer`] from a JSON-lines event script.
//! - **`session`** – A recording session object for tests and replays.
//! - **`storage`** – In-memory and file-backed [`DurableStorage`] implementations.
//! - **`timer`** – A tokio-backed scheduler and a manually-fired one for tests.
//! - **`ui`** – Recording UI host doubles (viewport, status, title, clipboard).
//!
//! [`DurableStorage`]: crate::application::storage::DurableStorage

pub mod config;
pub mod replay;
pub mod session;
pub mod storage;
pub mod timer;
pub mod ui;
