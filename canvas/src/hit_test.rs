#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{IconAnnotation, IconKind};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn icon_at(id: &str, x: f64, y: f64, size: f64) -> Annotation {
    Annotation::Icon(IconAnnotation { id: id.to_owned(), x, y, tool: IconKind::Warning, size, rot: 0.0 })
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_contains_edges() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(pt(0.0, 0.0)));
    assert!(r.contains(pt(10.0, 10.0)));
    assert!(!r.contains(pt(10.1, 5.0)));
}

// =============================================================
// bounds
// =============================================================

#[test]
fn icon_bounds_centered_square() {
    let b = bounds(&icon_at("a", 500.0, 400.0, 140.0));
    assert_eq!(b, Rect::new(430.0, 330.0, 140.0, 140.0));
}

#[test]
fn icon_bounds_ignore_rotation() {
    let mut a = icon_at("a", 500.0, 400.0, 140.0);
    a.rotate();
    assert_eq!(bounds(&a), Rect::new(430.0, 330.0, 140.0, 140.0));
}

#[test]
fn text_bounds_padded() {
    let b = bounds(&Annotation::text("Hi", 100.0, 100.0));
    assert_eq!(b.x, 88.0);
    assert_eq!(b.y, 88.0);
    assert_eq!(b.width, 164.0);
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_empty_store_is_none() {
    assert!(hit_test(&AnnotationStore::new(), pt(0.0, 0.0)).is_none());
}

#[test]
fn hit_icon_center() {
    let mut store = AnnotationStore::new();
    store.push(icon_at("a", 500.0, 500.0, 140.0));
    assert_eq!(hit_test(&store, pt(500.0, 500.0)).map(Annotation::id), Some("a"));
}

#[test]
fn hit_outside_everything_is_none() {
    let mut store = AnnotationStore::new();
    store.push(icon_at("a", 500.0, 500.0, 140.0));
    store.push(Annotation::text("Wet floor", 1200.0, 200.0));
    assert!(hit_test(&store, pt(100.0, 900.0)).is_none());
    assert!(hit_test(&store, pt(571.0, 500.0)).is_none());
}

#[test]
fn hit_text_anchor_point() {
    let mut store = AnnotationStore::new();
    let t = Annotation::text("Wet floor", 300.0, 300.0);
    let id = t.id().to_owned();
    store.push(t);
    assert_eq!(hit_test(&store, pt(300.0, 300.0)).map(Annotation::id), Some(id.as_str()));
}

#[test]
fn hit_text_padding_region() {
    let mut store = AnnotationStore::new();
    store.push(Annotation::text("Wet floor", 300.0, 300.0));
    assert!(hit_test(&store, pt(290.0, 290.0)).is_some());
    assert!(hit_test(&store, pt(287.0, 300.0)).is_none());
}

#[test]
fn hit_prefers_topmost() {
    let mut store = AnnotationStore::new();
    store.push(icon_at("bottom", 500.0, 500.0, 140.0));
    store.push(icon_at("top", 520.0, 520.0, 140.0));
    assert_eq!(hit_test(&store, pt(510.0, 510.0)).map(Annotation::id), Some("top"));
    assert_eq!(hit_test(&store, pt(440.0, 440.0)).map(Annotation::id), Some("bottom"));
}

#[test]
fn hit_skips_blank_text() {
    let mut store = AnnotationStore::new();
    store.push(Annotation::text("   ", 300.0, 300.0));
    assert!(hit_test(&store, pt(300.0, 300.0)).is_none());
}

#[test]
fn hit_blank_text_does_not_shadow_lower_icon() {
    let mut store = AnnotationStore::new();
    store.push(icon_at("icon", 300.0, 300.0, 140.0));
    store.push(Annotation::text("", 300.0, 300.0));
    assert_eq!(hit_test(&store, pt(300.0, 300.0)).map(Annotation::id), Some("icon"));
}
