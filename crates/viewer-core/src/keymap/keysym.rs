//! The keysym encoding used to describe key events to the remote session.
//!
//! Values follow X11/keysymdef.h.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! # What is a keysym? (for beginners)
//!
//! A keysym identifies a logical key or character, independent of the physical
//! key that produced it:
//!
//! | Range                     | Meaning                                    |
//! |---------------------------|--------------------------------------------|
//! | `0x0000 ..= 0x00FF`       | Latin-1 characters, keysym = code point    |
//! | `0xFF00 ..= 0xFFFF`       | Function keys (Return, Tab, arrows, Shift) |
//! | `0x0100_0100 ..= 0x0110_FFFF` | Any other Unicode code point, `0x0100_0000 \| cp` |
//!
//! Keysyms in the function-key block never produce text, which is what the
//! viewer uses to decide whether a key may also reach local text composition.

use serde::{Deserialize, Serialize};

/// Marker OR-ed into a code point above Latin-1 to form its keysym.
const UNICODE_KEYSYM_FLAG: u32 = 0x0100_0000;

/// Mask selecting the "high byte" of a 16-bit keysym plus the plane byte.
const FUNCTION_BLOCK_MASK: u32 = 0x00FF_FF00;

/// Value of [`FUNCTION_BLOCK_MASK`] bits for the reserved function-key block.
const FUNCTION_BLOCK: u32 = 0xFF00;

/// A key symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keysym(pub u32);

impl Keysym {
    /// `?`, substituted for code points that have no keysym.
    pub const QUESTION: Keysym = Keysym(0x003F);

    pub const BACKSPACE: Keysym = Keysym(0xFF08); // XK_BackSpace
    pub const TAB: Keysym = Keysym(0xFF09); // XK_Tab
    pub const RETURN: Keysym = Keysym(0xFF0D); // XK_Return
    pub const ESCAPE: Keysym = Keysym(0xFF1B); // XK_Escape
    pub const LEFT: Keysym = Keysym(0xFF51); // XK_Left
    pub const UP: Keysym = Keysym(0xFF52); // XK_Up
    pub const RIGHT: Keysym = Keysym(0xFF53); // XK_Right
    pub const DOWN: Keysym = Keysym(0xFF54); // XK_Down
    pub const F1: Keysym = Keysym(0xFFBE); // XK_F1
    pub const SHIFT_L: Keysym = Keysym(0xFFE1); // XK_Shift_L
    pub const CONTROL_L: Keysym = Keysym(0xFFE3); // XK_Control_L
    pub const ALT_L: Keysym = Keysym(0xFFE9); // XK_Alt_L
    pub const DELETE: Keysym = Keysym(0xFFFF); // XK_Delete

    /// Maps a Unicode code point to its keysym.
    ///
    /// Total and deterministic:
    ///
    /// - `0x0000 ..= 0x00FF` map to themselves.
    /// - Any other Unicode scalar value up to `0x10FFFF` maps to
    ///   `0x0100_0000 | code_point`.
    /// - Everything else (surrogate halves, values past `0x10FFFF`) maps to
    ///   [`Keysym::QUESTION`].
    pub fn from_code_point(code_point: u32) -> Self {
        match char::from_u32(code_point) {
            Some(c) => Self::from_char(c),
            None => Self::QUESTION,
        }
    }

    /// Maps a character to its keysym.  See [`Keysym::from_code_point`].
    pub fn from_char(c: char) -> Self {
        let cp = u32::from(c);
        if cp <= 0x00FF {
            Keysym(cp)
        } else {
            Keysym(UNICODE_KEYSYM_FLAG | cp)
        }
    }

    /// Whether this keysym produces text when typed.
    ///
    /// A keysym is typable unless bits 8..24 equal `0x00FF`, i.e. it lies in
    /// the function-key block `0xFF00 ..= 0xFFFF` (or its Unicode image
    /// `0x0100_FF00 ..= 0x0100_FFFF`).
    pub fn is_typable(self) -> bool {
        self.0 & FUNCTION_BLOCK_MASK != FUNCTION_BLOCK
    }

    /// Looks up a function-key keysym by its X11 name (without the `XK_` prefix).
    pub fn from_name(name: &str) -> Option<Self> {
        let keysym = match name {
            "BackSpace" => Self::BACKSPACE,
            "Tab" => Self::TAB,
            "Return" => Self::RETURN,
            "Escape" => Self::ESCAPE,
            "Left" => Self::LEFT,
            "Up" => Self::UP,
            "Right" => Self::RIGHT,
            "Down" => Self::DOWN,
            "F1" => Self::F1,
            "Shift_L" => Self::SHIFT_L,
            "Control_L" => Self::CONTROL_L,
            "Alt_L" => Self::ALT_L,
            "Delete" => Self::DELETE,
            "space" => Keysym(0x0020),
            _ => {
                // A single character names its own keysym ("a", "€").
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => return None,
                }
            }
        };
        Some(keysym)
    }
}

impl std::fmt::Display for Keysym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_maps_to_itself() {
        assert_eq!(Keysym::from_code_point(0x41), Keysym(0x41));
        assert_eq!(Keysym::from_char('a'), Keysym(0x61));
        assert_eq!(Keysym::from_char(' '), Keysym(0x20));
    }

    #[test]
    fn test_latin1_maps_to_itself() {
        assert_eq!(Keysym::from_char('é'), Keysym(0xE9));
        assert_eq!(Keysym::from_code_point(0xFF), Keysym(0xFF));
    }

    #[test]
    fn test_euro_sign_gets_unicode_flag() {
        assert_eq!(Keysym::from_code_point(0x20AC), Keysym(0x0100_20AC));
        assert_eq!(Keysym::from_char('€'), Keysym(0x0100_20AC));
    }

    #[test]
    fn test_first_non_latin1_and_astral_code_points() {
        assert_eq!(Keysym::from_code_point(0x0100), Keysym(0x0100_0100));
        assert_eq!(Keysym::from_char('😀'), Keysym(0x0101_F600));
        assert_eq!(Keysym::from_code_point(0x10_FFFF), Keysym(0x0110_FFFF));
    }

    #[test]
    fn test_surrogate_and_out_of_range_default_to_question_mark() {
        assert_eq!(Keysym::from_code_point(0xD800), Keysym::QUESTION);
        assert_eq!(Keysym::from_code_point(0xDFFF), Keysym::QUESTION);
        assert_eq!(Keysym::from_code_point(0x11_0000), Keysym::QUESTION);
        assert_eq!(Keysym::QUESTION, Keysym(0x3F));
    }

    #[test]
    fn test_function_block_is_not_typable() {
        for keysym in [
            Keysym::RETURN,
            Keysym::BACKSPACE,
            Keysym::TAB,
            Keysym::SHIFT_L,
            Keysym::F1,
            Keysym::DELETE,
            Keysym(0xFF00),
        ] {
            assert!(!keysym.is_typable(), "{keysym} must not be typable");
        }
    }

    #[test]
    fn test_printable_keysyms_are_typable() {
        for keysym in [
            Keysym(0x41),
            Keysym(0x20),
            Keysym(0xE9),
            Keysym(0x0100_20AC),
            Keysym(0xFE50), // XK_dead_grave: outside the function block
        ] {
            assert!(keysym.is_typable(), "{keysym} must be typable");
        }
    }

    #[test]
    fn test_unicode_keysyms_for_halfwidth_forms_share_the_function_block() {
        // U+FF21 (fullwidth 'A') → 0x0100FF21; bits 8..24 read 0x00FF, same as the block.
        assert!(!Keysym::from_code_point(0xFF21).is_typable());
        assert!(Keysym::from_code_point(0xFE21).is_typable());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Keysym::from_name("Return"), Some(Keysym::RETURN));
        assert_eq!(Keysym::from_name("space"), Some(Keysym(0x20)));
        assert_eq!(Keysym::from_name("q"), Some(Keysym(0x71)));
        assert_eq!(Keysym::from_name("€"), Some(Keysym(0x0100_20AC)));
        assert_eq!(Keysym::from_name("NoSuchKey"), None);
        assert_eq!(Keysym::from_name(""), None);
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Keysym::RETURN.to_string(), "0xff0d");
    }
}
