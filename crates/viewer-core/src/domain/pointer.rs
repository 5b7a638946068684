//! Pointer state and the math that turns raw pointer positions into remote
//! display coordinates.
//!
//! Three pure steps make up the translation pipeline:
//!
//! 1. [`view_relative_position`] – where the pointer is on screen, relative to
//!    the visible viewport rectangle.
//! 2. [`auto_scroll_delta`] – how far the page must scroll so the pointer
//!    stays visible (dead-zone policy: zero while inside the rectangle).
//! 3. [`scale_to_remote`] – the inverse of the render scale, mapping a
//!    display-local position into the remote display's native pixel space.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Point, Size, ViewportMetrics};

/// Errors raised by scale handling.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A render scale must be a finite number strictly greater than zero.
    #[error("scale factor must be finite and > 0, got {0}")]
    NonPositiveScale(f64),

    /// The remote display reported a zero-sized framebuffer.
    #[error("remote display size must be non-zero, got {width}x{height}")]
    EmptyDisplay { width: u32, height: u32 },
}

/// Position and button state of the pointer for a single event.
///
/// Constructed per event and never retained.  The five buttons follow the
/// remote protocol's mouse mask order: primary, middle, secondary, wheel-up,
/// wheel-down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    /// Horizontal position in display-local coordinates.
    pub x: f64,
    /// Vertical position in display-local coordinates.
    pub y: f64,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub middle: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
}

impl PointerState {
    /// A pointer at `(x, y)` with no buttons held.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// The position component of this state.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns a copy of this state moved to `position`, buttons unchanged.
    pub fn with_position(self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }
}

/// The display's current render scale.
///
/// A value of `2.0` means each remote pixel is drawn as 2×2 screen pixels.
/// Always finite and strictly positive; construction enforces this so the
/// division in [`scale_to_remote`] can never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// No scaling.
    pub const IDENTITY: ScaleFactor = ScaleFactor(1.0);

    /// Wraps `value` as a scale factor.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveScale`] if `value` is zero,
    /// negative, NaN, or infinite.
    pub fn new(value: f64) -> Result<Self, GeometryError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GeometryError::NonPositiveScale(value))
        }
    }

    /// The raw scale value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Computes the largest scale at which a `width`×`height` remote display
    /// fits entirely inside `window`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyDisplay`] if either remote dimension is
    /// zero, and [`GeometryError::NonPositiveScale`] if the window has no area.
    pub fn fit_to_window(window: Size, width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::EmptyDisplay { width, height });
        }
        let fit = (window.width / f64::from(width)).min(window.height / f64::from(height));
        Self::new(fit)
    }
}

/// Returns the pointer's position relative to the visible viewport rectangle.
///
/// `local` is the event position inside the display element, and
/// `element_offset` is the element's document-space offset.  Subtracting the
/// scroll offset turns the document position into an on-screen one.
pub fn view_relative_position(
    local: Point,
    element_offset: Point,
    viewport: &ViewportMetrics,
) -> Point {
    Point::new(
        local.x + element_offset.x - viewport.scroll_x,
        local.y + element_offset.y - viewport.scroll_y,
    )
}

/// Computes the scroll delta required to keep a view-relative position on screen.
///
/// Each axis is independent:
///
/// | relative position     | delta                  |
/// |-----------------------|------------------------|
/// | `> extent`            | `position - extent`    |
/// | `< 0`                 | `position` (negative)  |
/// | `0 ..= extent`        | `0`                    |
pub fn auto_scroll_delta(relative: Point, viewport: &ViewportMetrics) -> Point {
    Point::new(
        axis_scroll_delta(relative.x, viewport.width),
        axis_scroll_delta(relative.y, viewport.height),
    )
}

fn axis_scroll_delta(position: f64, extent: f64) -> f64 {
    if position > extent {
        position - extent
    } else if position < 0.0 {
        position
    } else {
        0.0
    }
}

/// Maps a display-local pointer state into the remote display's native space.
///
/// The position is divided by the render scale; button state passes through
/// unchanged.
pub fn scale_to_remote(state: PointerState, scale: ScaleFactor) -> PointerState {
    state.with_position(Point::new(state.x / scale.get(), state.y / scale.get()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
