//! Session lifecycle states reported by the session object.
//!
//! The session object reports its state as a small integer code.  Every code,
//! including ones this viewer does not know, decodes to a [`SessionState`], so
//! the state table is total and a new server-side state can never crash the UI.

use serde::{Deserialize, Serialize};

/// What the status overlay should do for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDisplay {
    /// Show the overlay with this message.
    Show(&'static str),
    /// Hide the overlay (and any error).
    Hide,
}

/// What happens to the title prefix for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixUpdate {
    /// Replace the prefix with this text.
    Set(&'static str),
    /// Remove the prefix.
    Clear,
    /// Leave the prefix as it was.
    Keep,
}

/// Lifecycle state of the remote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Connecting,
    /// Connected, but the first framebuffer update has not arrived yet.
    WaitingForUpdate,
    Connected,
    Disconnecting,
    Disconnected,
    /// A code this viewer does not recognise.  The raw code is kept for logging.
    Unknown(i32),
}

impl SessionState {
    /// Decodes a state code reported by the session object.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Idle,
            1 => Self::Connecting,
            2 => Self::WaitingForUpdate,
            3 => Self::Connected,
            4 => Self::Disconnecting,
            5 => Self::Disconnected,
            other => Self::Unknown(other),
        }
    }

    /// The wire code for this state.
    pub fn code(self) -> i32 {
        match self {
            Self::Idle => 0,
            Self::Connecting => 1,
            Self::WaitingForUpdate => 2,
            Self::Connected => 3,
            Self::Disconnecting => 4,
            Self::Disconnected => 5,
            Self::Unknown(code) => code,
        }
    }

    /// Status overlay behaviour on entering this state.
    pub fn status(self) -> StatusDisplay {
        match self {
            Self::Idle => StatusDisplay::Show("Idle."),
            Self::Connecting => StatusDisplay::Show("Connecting..."),
            Self::WaitingForUpdate => {
                StatusDisplay::Show("Connected, waiting for first update...")
            }
            Self::Connected => StatusDisplay::Hide,
            Self::Disconnecting => StatusDisplay::Show("Disconnecting..."),
            Self::Disconnected => StatusDisplay::Show("Disconnected."),
            Self::Unknown(_) => StatusDisplay::Show("[UNKNOWN STATUS]"),
        }
    }

    /// Title prefix behaviour on entering this state.
    pub fn title_prefix(self) -> PrefixUpdate {
        match self {
            Self::Idle => PrefixUpdate::Set("[Idle]"),
            Self::Connecting => PrefixUpdate::Set("[Connecting...]"),
            Self::WaitingForUpdate => PrefixUpdate::Set("[Waiting...]"),
            Self::Connected => PrefixUpdate::Clear,
            Self::Disconnecting => PrefixUpdate::Set("[Disconnecting...]"),
            Self::Disconnected => PrefixUpdate::Set("[Disconnected]"),
            Self::Unknown(_) => PrefixUpdate::Keep,
        }
    }

    /// Whether this state is the fully connected, interactive state.
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
