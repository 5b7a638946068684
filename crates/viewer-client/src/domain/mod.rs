//! Domain layer for viewer-client.
//!
//! Plain data with no I/O: the configuration struct and the inbound event
//! vocabulary.  Both derive serde traits so they can be read from TOML config
//! files and JSON-lines replay scripts.

pub mod config;
pub mod events;

pub use config::ViewerConfig;
pub use events::{PointerInput, PointerSource, SessionNotification, ViewerEvent};
