//! Rendering: draws an editor scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of session state and produces pixels; it
//! never mutates application state. Geometry comes from [`crate::overlay`].
//!
//! Internal drawing helpers return `Result<(), JsValue>`; the public entry
//! points convert failures into [`RenderError`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::IconAtlas;
use crate::config::EditorConfig;
use crate::consts::{EDITOR_HEIGHT, EDITOR_WIDTH};
use crate::doc::{Annotation, AnnotationStore, IconAnnotation, TextAnnotation};
use crate::hit::{self, Rect};
use crate::overlay::{self, BACKDROP_RADIUS, BRACKET_LEN, RenderVariant, SafeZone};
use crate::transform::Transform;

/// Selection dash segment length in canvas pixels.
const SELECTION_DASH: f64 = 6.0;
/// Gap between an annotation's bounds and its selection outline.
const SELECTION_INSET: f64 = 4.0;
const SELECTION_COLOR: &str = "#1E90FF";

const GUIDE_DIM: &str = "rgba(0, 0, 0, 0.45)";
const GUIDE_STROKE: &str = "rgba(255, 255, 255, 0.8)";
const BADGE_FONT: &str = "bold 20px sans-serif";

/// Rendering failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
    #[error("2d context unavailable")]
    NoContext,
    #[error("no document")]
    NoDocument,
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(format!("{value:?}"))
    }
}

/// Read-only view of everything a frame needs.
pub struct Scene<'a> {
    pub transform: &'a Transform,
    pub store: &'a AnnotationStore,
    pub selected: Option<&'a str>,
    pub source: Option<&'a HtmlImageElement>,
    pub icons: &'a IconAtlas,
    pub config: &'a EditorConfig,
}

/// Get the 2D context of a canvas element.
///
/// # Errors
///
/// Returns [`RenderError::NoContext`] when the element has no 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderError> {
    canvas
        .get_context("2d")?
        .ok_or(RenderError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RenderError::NoContext)
}

/// Draw the full scene for `variant`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>, variant: RenderVariant) -> Result<(), RenderError> {
    draw_layers(ctx, scene, variant).map_err(RenderError::from)
}

fn draw_layers(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>, variant: RenderVariant) -> Result<(), JsValue> {
    // Layer 1: clear and background.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, EDITOR_WIDTH, EDITOR_HEIGHT);
    ctx.set_fill_style_str(&scene.config.background);
    ctx.fill_rect(0.0, 0.0, EDITOR_WIDTH, EDITOR_HEIGHT);

    // Layer 2: source photo.
    if let Some(img) = scene.source {
        let t = scene.transform;
        let w = f64::from(img.natural_width()) * t.scale;
        let h = f64::from(img.natural_height()) * t.scale;
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, t.x, t.y, w, h)?;
    }

    // Layer 3: crop guides.
    if variant.shows_guides() && scene.config.show_safe_zone {
        draw_safe_zone(ctx)?;
    }

    // Layer 4: annotations in insertion order.
    for a in scene.store.visible() {
        match a {
            Annotation::Icon(icon) => draw_icon(ctx, icon, scene.icons)?,
            Annotation::Text(text) => draw_text(ctx, text, variant)?,
        }
    }

    // Layer 5: selection outline.
    if variant.shows_guides() {
        if let Some(a) = scene.selected.and_then(|id| scene.store.get(id)).filter(|a| a.is_visible()) {
            draw_selection(ctx, &hit::bounds(a))?;
        }
    }

    Ok(())
}

// =============================================================
// Annotations
// =============================================================

fn draw_icon(ctx: &CanvasRenderingContext2d, icon: &IconAnnotation, icons: &IconAtlas) -> Result<(), JsValue> {
    let Some(img) = icons.ready(icon.tool) else {
        return Ok(());
    };
    let half = icon.size / 2.0;
    ctx.save();
    ctx.translate(icon.x, icon.y)?;
    ctx.rotate(icon.rot.to_radians())?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -half, -half, icon.size, icon.size)?;
    ctx.restore();
    Ok(())
}

fn draw_text(ctx: &CanvasRenderingContext2d, a: &TextAnnotation, variant: RenderVariant) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_font(&format!("bold {}px sans-serif", a.size));
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    let layout = overlay::layout_text(a, variant, |line| measured_text_width(ctx, line));
    let style = variant.backdrop();

    rounded_rect_path(ctx, &layout.backdrop, BACKDROP_RADIUS)?;
    ctx.set_fill_style_str(style.fill);
    ctx.fill();
    if let Some((color, width)) = style.border {
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.stroke();
    }

    ctx.set_fill_style_str("#FFFFFF");
    for (idx, line) in layout.lines.iter().enumerate() {
        ctx.fill_text(line, layout.x, layout.line_top(idx))?;
    }

    ctx.restore();
    Ok(())
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}

// =============================================================
// Guides and selection
// =============================================================

fn draw_safe_zone(ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
    let zone = SafeZone::for_canvas(EDITOR_WIDTH, EDITOR_HEIGHT);
    ctx.save();

    ctx.set_fill_style_str(GUIDE_DIM);
    for r in zone.outside_square() {
        ctx.fill_rect(r.x, r.y, r.width, r.height);
    }

    ctx.set_stroke_style_str(GUIDE_STROKE);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(zone.frame.x + 1.0, zone.frame.y + 1.0, zone.frame.width - 2.0, zone.frame.height - 2.0);

    ctx.set_line_width(4.0);
    for bracket in overlay::corner_brackets(zone.square, BRACKET_LEN) {
        ctx.begin_path();
        ctx.move_to(bracket[0].x, bracket[0].y);
        ctx.line_to(bracket[1].x, bracket[1].y);
        ctx.line_to(bracket[2].x, bracket[2].y);
        ctx.stroke();
    }

    ctx.set_font(BADGE_FONT);
    ctx.set_text_baseline("top");
    ctx.set_text_align("left");
    ctx.set_fill_style_str(GUIDE_STROKE);
    ctx.fill_text("16:9", zone.frame.x + 16.0, zone.frame.y + 16.0)?;
    ctx.fill_text("1:1", zone.square.x + 16.0, zone.square.y + 16.0)?;

    ctx.restore();
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, bounds: &Rect) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(2.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH.into());
    dash_array.push(&SELECTION_DASH.into());
    ctx.set_line_dash(&dash_array)?;

    ctx.stroke_rect(
        bounds.x - SELECTION_INSET,
        bounds.y - SELECTION_INSET,
        bounds.width + SELECTION_INSET * 2.0,
        bounds.height + SELECTION_INSET * 2.0,
    );
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Trace a rounded rectangle as the current path.
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, r: &Rect, radius: f64) -> Result<(), JsValue> {
    let radius = radius.min(r.width / 2.0).min(r.height / 2.0).max(0.0);
    let (l, t, rt, b) = (r.x, r.y, r.x + r.width, r.y + r.height);
    ctx.begin_path();
    ctx.move_to(l + radius, t);
    ctx.arc_to(rt, t, rt, b, radius)?;
    ctx.arc_to(rt, b, l, b, radius)?;
    ctx.arc_to(l, b, l, t, radius)?;
    ctx.arc_to(l, t, rt, t, radius)?;
    ctx.close_path();
    Ok(())
}
