//! UI host adapters.
//!
//! The page-side implementations (element lookup, class toggling, inline
//! styles) belong to the embedding page.  This module ships recording doubles
//! for tests and `viewer-replay`.

pub mod mock;
