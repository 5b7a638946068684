//! [`DurableStorage`] implementations.
//!
//! - [`memory::MemoryStorage`] keeps values in a `HashMap` for the lifetime of
//!   the process.
//! - [`file::FileStorage`] keeps every key in one JSON document on disk, so
//!   values survive across `viewer-replay` runs the way local storage survives
//!   page reloads.
//!
//! [`DurableStorage`]: crate::application::storage::DurableStorage

pub mod file;
pub mod memory;
