//! Pan/zoom transform mapping a source image onto the fixed editor canvas.
//!
//! The mapping is translate-then-scale: an image pixel `(ix, iy)` lands on
//! canvas point `(x + ix * scale, y + iy * scale)`.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either canvas or image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// Placement of the source image on the canvas.
///
/// `x` / `y` are the canvas coordinates of the image's top-left corner.
/// `scale` is image pixels to canvas pixels and is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

/// Clamp a scale into the permitted zoom range.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

impl Transform {
    /// Cover-fit an `img_w` x `img_h` image into the canvas and centre it.
    ///
    /// The scaled image covers the canvas in both axes; overflow is cropped.
    /// Degenerate image sizes produce the identity transform.
    #[must_use]
    pub fn fit_cover(canvas_w: f64, canvas_h: f64, img_w: f64, img_h: f64) -> Self {
        if img_w <= 0.0 || img_h <= 0.0 || !img_w.is_finite() || !img_h.is_finite() {
            return Self::default();
        }
        let scale = (canvas_w / img_w).max(canvas_h / img_h);
        Self {
            x: (canvas_w - img_w * scale) / 2.0,
            y: (canvas_h - img_h * scale) / 2.0,
            scale,
        }
    }

    /// Whether the values are usable: finite and with a positive scale.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite() && self.scale > 0.0
    }

    /// Map a canvas point to image pixel coordinates.
    #[must_use]
    pub fn canvas_to_image(&self, canvas: Point) -> Point {
        Point {
            x: (canvas.x - self.x) / self.scale,
            y: (canvas.y - self.y) / self.scale,
        }
    }

    /// Map an image pixel to canvas coordinates.
    #[must_use]
    pub fn image_to_canvas(&self, image: Point) -> Point {
        Point {
            x: image.x * self.scale + self.x,
            y: image.y * self.scale + self.y,
        }
    }

    /// Add `delta` to the scale, keeping canvas point `(cx, cy)` stationary.
    ///
    /// Returns `false` when clamping leaves the scale unchanged.
    pub fn zoom_at(&mut self, cx: f64, cy: f64, delta: f64) -> bool {
        self.set_scale_at(cx, cy, self.scale + delta)
    }

    /// Multiply the scale by `factor`, keeping canvas point `(cx, cy)` stationary.
    ///
    /// Non-finite factors are ignored.
    pub fn zoom_by_factor(&mut self, cx: f64, cy: f64, factor: f64) -> bool {
        self.set_scale_at(cx, cy, self.scale * factor)
    }

    #[allow(clippy::float_cmp)]
    fn set_scale_at(&mut self, cx: f64, cy: f64, requested: f64) -> bool {
        if !requested.is_finite() {
            return false;
        }
        let old = self.scale;
        let new = clamp_scale(requested);
        if new == old {
            return false;
        }
        let ratio = new / old;
        self.x = cx - (cx - self.x) * ratio;
        self.y = cy - (cy - self.y) * ratio;
        self.scale = new;
        true
    }

    /// Anchor for a pan gesture starting at `pointer`.
    #[must_use]
    pub fn pan_anchor(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.x, pointer.y - self.y)
    }

    /// Move the image so the anchor captured by [`Transform::pan_anchor`] sits under `pointer`.
    pub fn pan_to(&mut self, pointer: Point, anchor: Point) {
        self.x = pointer.x - anchor.x;
        self.y = pointer.y - anchor.y;
    }
}
