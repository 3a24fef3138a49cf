#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn logical_viewport_is_identity() {
    let p = Point::new(12.5, 99.0);
    assert_eq!(LogicalViewport.to_canvas(p), p);
}

#[test]
fn rect_viewport_scales_half_size_element() {
    let vp = RectViewport::editor(100.0, 50.0, 960.0, 540.0);
    assert_eq!(vp.to_canvas(Point::new(100.0, 50.0)), Point::new(0.0, 0.0));
    assert_eq!(vp.to_canvas(Point::new(580.0, 320.0)), Point::new(960.0, 540.0));
    assert_eq!(vp.to_canvas(Point::new(1060.0, 590.0)), Point::new(1920.0, 1080.0));
}

#[test]
fn rect_viewport_zero_size_does_not_divide_by_zero() {
    let vp = RectViewport::editor(10.0, 10.0, 0.0, 0.0);
    assert_eq!(vp.to_canvas(Point::new(15.0, 20.0)), Point::new(5.0, 10.0));
}
