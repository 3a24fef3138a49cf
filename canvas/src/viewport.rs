//! Mapping from device/pointer coordinates to the logical canvas surface.
//!
//! The editor always works on a fixed logical surface regardless of how big
//! the element is on screen. The host injects a [`Viewport`] describing the
//! element's current rect; the controller never looks up DOM elements itself.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{EDITOR_HEIGHT, EDITOR_WIDTH};
use crate::transform::Point;

/// Converts pointer coordinates into logical canvas coordinates.
pub trait Viewport {
    /// Map a client-space point (e.g. `clientX`/`clientY`) to canvas space.
    fn to_canvas(&self, client: Point) -> Point;
}

/// The identity mapping, for hosts that already report canvas coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalViewport;

impl Viewport for LogicalViewport {
    fn to_canvas(&self, client: Point) -> Point {
        client
    }
}

/// A displayed element rect stretched over a logical surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectViewport {
    /// Element left edge in client pixels.
    pub left: f64,
    /// Element top edge in client pixels.
    pub top: f64,
    /// Displayed width in client pixels.
    pub width: f64,
    /// Displayed height in client pixels.
    pub height: f64,
    /// Logical surface width.
    pub logical_width: f64,
    /// Logical surface height.
    pub logical_height: f64,
}

impl RectViewport {
    /// Element rect over the 1920x1080 editor surface.
    #[must_use]
    pub fn editor(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height, logical_width: EDITOR_WIDTH, logical_height: EDITOR_HEIGHT }
    }
}

impl Viewport for RectViewport {
    fn to_canvas(&self, client: Point) -> Point {
        let sx = if self.width > 0.0 { self.logical_width / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { self.logical_height / self.height } else { 1.0 };
        Point::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }
}
