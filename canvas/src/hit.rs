//! Hit-testing against slot annotations.
//!
//! Bounds are deliberately approximate: icons use their unrotated square and
//! text uses the glyph-width estimate from [`crate::text`], so hit-testing
//! never needs a rendering context.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Annotation, AnnotationStore};
use crate::text;
use crate::transform::Point;

/// Axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Bounding region used for hit-testing and the selection outline.
#[must_use]
pub fn bounds(annotation: &Annotation) -> Rect {
    match annotation {
        Annotation::Icon(a) => {
            let half = a.size / 2.0;
            Rect::new(a.x - half, a.y - half, a.size, a.size)
        }
        Annotation::Text(a) => {
            let (x, y, w, h) = text::padded_box(a.x, a.y, &a.text, a.size);
            Rect::new(x, y, w, h)
        }
    }
}

/// The topmost visible annotation containing `p`, if any.
#[must_use]
pub fn hit_test(store: &AnnotationStore, p: Point) -> Option<&Annotation> {
    store.visible().rev().find(|a| bounds(a).contains(p))
}
