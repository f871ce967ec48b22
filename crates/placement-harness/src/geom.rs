//! Geometry primitives for screens and window bounds.
//!
//! Coordinates are screen-space pixels with a top-left origin. Multi-monitor
//! desktops can place screens at negative coordinates, so origins are signed.

use std::fmt;

/// Default pixel slack when comparing window bounds to a screen rectangle.
///
/// Absorbs measurement noise from window chrome and animation settling.
pub const DEFAULT_TOLERANCE: f64 = 100.0;

/// Screen-space rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Horizontal origin in pixels.
    pub left: f64,
    /// Vertical origin in pixels.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{} {}x{})",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Outer bounds of a window, in the same coordinate space as [`Rect`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowBounds {
    /// Horizontal position of the window's left edge.
    pub screen_left: f64,
    /// Vertical position of the window's top edge.
    pub screen_top: f64,
    /// Outer width, including chrome.
    pub outer_width: f64,
    /// Outer height, including chrome.
    pub outer_height: f64,
}

impl WindowBounds {
    /// Construct window bounds from position and outer size.
    #[must_use]
    pub const fn new(
        screen_left: f64,
        screen_top: f64,
        outer_width: f64,
        outer_height: f64,
    ) -> Self {
        Self {
            screen_left,
            screen_top,
            outer_width,
            outer_height,
        }
    }
}

impl fmt::Display for WindowBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{} {}x{})",
            self.screen_left, self.screen_top, self.outer_width, self.outer_height
        )
    }
}

/// A logical display: a labelled rectangle as enumerated by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Screen {
    /// Human-readable label reported by the host.
    pub label: String,
    /// Position and size of the screen on the desktop.
    pub rect: Rect,
}

impl Screen {
    /// Construct a screen from a label and its rectangle.
    #[must_use]
    pub fn new(label: impl Into<String>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            rect,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.label, self.rect)
    }
}

/// True iff window bounds `w` lie within screen rectangle `s` expanded by
/// `tolerance` pixels on every side.
#[must_use]
pub fn is_window_on_screen(w: &WindowBounds, s: &Rect, tolerance: f64) -> bool {
    tracing::debug!(window = %w, screen = %s, tolerance, "bounds check");
    w.screen_left >= s.left - tolerance
        && w.screen_top >= s.top - tolerance
        && w.screen_left + w.outer_width <= s.left + s.width + tolerance
        && w.screen_top + w.outer_height <= s.top + s.height + tolerance
}
