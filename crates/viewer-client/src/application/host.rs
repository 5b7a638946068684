//! UI host collaborators.
//!
//! These traits are the only way the controller touches the page: reading
//! viewport geometry, scrolling, driving the hidden composition target, the
//! status overlay, the window title, and the clipboard hand-off.  Element
//! lookup and styling live behind them.

use thiserror::Error;
use viewer_core::{Point, Size, ViewportMetrics};

/// The scrollable window and the display element inside it.
pub trait Viewport: Send + Sync {
    /// Current visible extent and scroll offset.  Must be read fresh per event.
    fn metrics(&self) -> ViewportMetrics;

    /// Document-space offset of the display element's top-left corner.
    fn display_offset(&self) -> Point;

    /// Scrolls the page by `delta`.  Best-effort: the host clamps at document
    /// bounds and silently drops the remainder.
    fn scroll_by(&self, delta: Point);

    /// Inner size of the browser window.
    fn window_size(&self) -> Size;
}

/// The hidden text field that receives focus for local text composition.
pub trait CompositionTarget: Send + Sync {
    /// The field's current text.
    fn text(&self) -> String;

    /// Empties the field.
    fn clear(&self);

    /// Moves the field to a document-space position.
    fn move_to(&self, position: Point);
}

/// The status overlay.
///
/// Implementations own the presentation: a normal status clears any error
/// styling and shows the display at full opacity; an error applies the error
/// style and dims the display.
pub trait StatusView: Send + Sync {
    /// Shows `text` as a normal status message.
    fn show_status(&self, text: &str);

    /// Hides the overlay and clears any error styling.
    fn hide_status(&self);

    /// Shows `text` as a blocking error.
    fn show_error(&self, text: &str);

    /// Rendered size of the status dialog.
    fn dialog_size(&self) -> Size;

    /// Moves the status dialog to a document-space position.
    fn place_dialog(&self, position: Point);
}

/// The window title.
pub trait TitleSink: Send + Sync {
    fn set_title(&self, title: &str);
}

/// Error type for clipboard hand-off.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No parent window context is available to receive the data.
    #[error("no clipboard receiver is attached")]
    NoReceiver,
}

/// Hands clipboard data received from the remote host to the parent context.
pub trait ClipboardSink: Send + Sync {
    fn set_clipboard(&self, data: &str) -> Result<(), ClipboardError>;
}
