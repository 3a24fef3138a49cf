#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{EDITOR_HEIGHT, EDITOR_WIDTH};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_midpoint() {
    let mid = Point::new(10.0, 20.0).midpoint(Point::new(30.0, 40.0));
    assert!(point_approx_eq(mid, Point::new(20.0, 30.0)));
}

// --- fit_cover ---

#[test]
fn fit_cover_tall_image_into_editor() {
    let t = Transform::fit_cover(EDITOR_WIDTH, EDITOR_HEIGHT, 1000.0, 2000.0);
    assert!(approx_eq(t.scale, 1.92));
    assert!(approx_eq(t.x, 0.0));
    assert!(approx_eq(t.y, -1380.0));
}

#[test]
fn fit_cover_wide_image_into_editor() {
    let t = Transform::fit_cover(EDITOR_WIDTH, EDITOR_HEIGHT, 4000.0, 1000.0);
    assert!(approx_eq(t.scale, 1.08));
    assert!(approx_eq(t.y, 0.0));
    assert!(approx_eq(t.x, (1920.0 - 4320.0) / 2.0));
}

#[test]
fn fit_cover_always_covers_canvas() {
    let sizes = [(1.0, 1.0), (640.0, 480.0), (1920.0, 1080.0), (3000.0, 200.0), (200.0, 3000.0), (7.0, 13.0)];
    for (w, h) in sizes {
        let t = Transform::fit_cover(EDITOR_WIDTH, EDITOR_HEIGHT, w, h);
        assert!(w * t.scale >= EDITOR_WIDTH - EPSILON, "{w}x{h} leaves a horizontal gap");
        assert!(h * t.scale >= EDITOR_HEIGHT - EPSILON, "{w}x{h} leaves a vertical gap");
        assert!(t.x <= EPSILON && t.y <= EPSILON);
    }
}

#[test]
fn fit_cover_degenerate_image_is_identity() {
    assert_eq!(Transform::fit_cover(1920.0, 1080.0, 0.0, 100.0), Transform::default());
    assert_eq!(Transform::fit_cover(1920.0, 1080.0, 100.0, -1.0), Transform::default());
}

// --- conversions ---

#[test]
fn canvas_image_roundtrip() {
    let t = Transform { x: 35.0, y: -12.0, scale: 2.5 };
    let p = Point::new(400.0, 250.0);
    assert!(point_approx_eq(t.image_to_canvas(t.canvas_to_image(p)), p));
}

#[test]
fn is_valid_rejects_non_positive_scale() {
    assert!(Transform::default().is_valid());
    assert!(!Transform { x: 0.0, y: 0.0, scale: 0.0 }.is_valid());
    assert!(!Transform { x: f64::NAN, y: 0.0, scale: 1.0 }.is_valid());
}

// --- zoom_at ---

#[test]
fn zoom_at_preserves_point_under_cursor() {
    let mut t = Transform { x: -100.0, y: 40.0, scale: 1.3 };
    let cursor = Point::new(712.0, 455.0);
    let before = t.canvas_to_image(cursor);
    assert!(t.zoom_at(cursor.x, cursor.y, 0.7));
    let after = t.canvas_to_image(cursor);
    assert!(point_approx_eq(before, after));
}

#[test]
fn zoom_at_clamps_to_max() {
    let mut t = Transform { x: 0.0, y: 0.0, scale: 9.95 };
    assert!(t.zoom_at(0.0, 0.0, 5.0));
    assert_eq!(t.scale, MAX_SCALE);
}

#[test]
fn zoom_at_clamps_to_min() {
    let mut t = Transform { x: 0.0, y: 0.0, scale: 0.3 };
    assert!(t.zoom_at(10.0, 10.0, -50.0));
    assert_eq!(t.scale, MIN_SCALE);
}

#[test]
fn zoom_at_at_limit_is_noop() {
    let mut t = Transform { x: 12.0, y: 34.0, scale: MAX_SCALE };
    assert!(!t.zoom_at(500.0, 500.0, 1.0));
    assert_eq!(t, Transform { x: 12.0, y: 34.0, scale: MAX_SCALE });
}

#[test]
fn zoom_scale_stays_in_range_for_any_delta() {
    let deltas = [-1000.0, -3.0, -0.1, 0.0, 0.05, 2.0, 9.0, 1e6];
    for d in deltas {
        let mut t = Transform { x: 0.0, y: 0.0, scale: 1.0 };
        t.zoom_at(100.0, 100.0, d);
        assert!((MIN_SCALE..=MAX_SCALE).contains(&t.scale), "delta {d} gave {}", t.scale);
    }
}

#[test]
fn non_finite_zoom_is_ignored() {
    let start = Transform { x: 5.0, y: 6.0, scale: 2.0 };
    let mut t = start;
    assert!(!t.zoom_at(100.0, 100.0, f64::NAN));
    assert!(!t.zoom_by_factor(100.0, 100.0, f64::NAN));
    assert!(!t.zoom_by_factor(100.0, 100.0, f64::INFINITY));
    assert_eq!(t, start);
}

#[test]
fn zoom_by_factor_preserves_point() {
    let mut t = Transform { x: 10.0, y: 20.0, scale: 1.0 };
    let c = Point::new(960.0, 540.0);
    let before = t.canvas_to_image(c);
    assert!(t.zoom_by_factor(c.x, c.y, 1.5));
    assert!(approx_eq(t.scale, 1.5));
    assert!(point_approx_eq(t.canvas_to_image(c), before));
}

// --- pan ---

#[test]
fn pan_moves_image_with_pointer() {
    let mut t = Transform { x: 50.0, y: 60.0, scale: 2.0 };
    let anchor = t.pan_anchor(Point::new(100.0, 100.0));
    t.pan_to(Point::new(130.0, 90.0), anchor);
    assert!(approx_eq(t.x, 80.0));
    assert!(approx_eq(t.y, 50.0));
    assert_eq!(t.scale, 2.0);
}
