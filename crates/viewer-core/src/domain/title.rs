//! Window title composition.
//!
//! The title is a pure function of two optional parts: a status prefix
//! derived from the session state, and the connection name announced by the
//! remote host.  It is recomputed whenever either part changes.

use super::session_state::PrefixUpdate;

/// The two inputs of the window title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleContext {
    prefix: Option<String>,
    connection_name: Option<String>,
}

impl TitleContext {
    /// Creates a context with no prefix and the given initial connection name.
    pub fn new(connection_name: Option<String>) -> Self {
        Self {
            prefix: None,
            connection_name: connection_name.filter(|n| !n.is_empty()),
        }
    }

    /// The current status prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The current connection name, if any.
    pub fn connection_name(&self) -> Option<&str> {
        self.connection_name.as_deref()
    }

    /// Applies a prefix update produced by a state change.
    pub fn apply_prefix(&mut self, update: PrefixUpdate) {
        match update {
            PrefixUpdate::Set(prefix) => self.prefix = Some(prefix.to_string()),
            PrefixUpdate::Clear => self.prefix = None,
            PrefixUpdate::Keep => {}
        }
    }

    /// Replaces the connection name.  An empty name counts as absent.
    pub fn set_connection_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.connection_name = (!name.is_empty()).then_some(name);
    }

    /// Computes the window title.
    ///
    /// Returns `None` when both parts are absent; the caller then leaves the
    /// current window title untouched.
    pub fn title(&self) -> Option<String> {
        match (self.prefix(), self.connection_name()) {
            (Some(prefix), Some(name)) => Some(format!("{prefix} {name}")),
            (Some(prefix), None) => Some(prefix.to_string()),
            (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}
