//! Viewport geometry primitives.
//!
//! All coordinates are CSS-pixel `f64` values as reported by the UI host.
//! Positions on the page ("document space") differ from positions on screen
//! ("view space") by the current scroll offsets.

use serde::{Deserialize, Serialize};

/// A position in a 2-D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its two coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a size from its two extents.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Visible extent and scroll offset of the scrollable viewport.
///
/// Read fresh from the UI host on every pointer event.  Scrolling can happen
/// between any two events, so a metrics value must never be cached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportMetrics {
    /// Visible width of the viewport.
    pub width: f64,
    /// Visible height of the viewport.
    pub height: f64,
    /// Current horizontal scroll offset of the page.
    pub scroll_x: f64,
    /// Current vertical scroll offset of the page.
    pub scroll_y: f64,
}

impl ViewportMetrics {
    /// The visible extent of the viewport.
    pub fn visible_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The current scroll offset of the page.
    pub fn scroll_offset(&self) -> Point {
        Point::new(self.scroll_x, self.scroll_y)
    }
}

/// Returns the document-space top-left corner that centers an element of
/// `element` size within the visible viewport.
///
/// The scroll offset is added back so the element lands in the middle of what
/// the user currently sees, not in the middle of the top of the page.
pub fn centered_position(viewport: &ViewportMetrics, element: Size) -> Point {
    Point::new(
        (viewport.width - element.width) / 2.0 + viewport.scroll_x,
        (viewport.height - element.height) / 2.0 + viewport.scroll_y,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
