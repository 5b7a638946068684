//! Keysym encoding for key events sent to the remote session.
//!
//! Browser key handling already yields keysyms; this module covers the two
//! rules the viewer applies on top: converting characters inserted without a
//! key press (voice input, IME commits) into keysyms, and deciding which
//! keysyms produce text locally.

pub mod keysym;

pub use keysym::Keysym;
