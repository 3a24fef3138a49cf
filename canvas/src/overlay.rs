//! Render geometry that does not need a drawing context.
//!
//! The browser renderer in [`crate::render`] only executes what is computed
//! here: the safe-zone guide rectangles, per-variant text line breaking and
//! backdrop styles. Keeping these pure lets them be tested natively.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::consts::TEXT_PADDING;
use crate::doc::TextAnnotation;
use crate::hit::Rect;
use crate::text;
use crate::transform::Point;

/// Length of each safe-zone corner bracket arm.
pub const BRACKET_LEN: f64 = 48.0;

/// Corner radius of text backdrops.
pub const BACKDROP_RADIUS: f64 = 10.0;

/// Which surface a frame is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderVariant {
    /// Interactive canvas: guides, selection outline, newline-only text.
    Screen,
    /// Flattened bitmap: no guides, word-wrapped text, bordered backdrop.
    Export,
}

/// Fill and optional border of a text backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropStyle {
    pub fill: &'static str,
    /// Border colour and width.
    pub border: Option<(&'static str, f64)>,
}

impl RenderVariant {
    #[must_use]
    pub fn shows_guides(self) -> bool {
        matches!(self, Self::Screen)
    }

    #[must_use]
    pub fn backdrop(self) -> BackdropStyle {
        match self {
            Self::Screen => BackdropStyle { fill: "rgba(0, 0, 0, 0.75)", border: None },
            Self::Export => BackdropStyle { fill: "rgba(0, 0, 0, 0.65)", border: Some(("rgba(255, 255, 255, 0.35)", 1.0)) },
        }
    }

    /// Break text into drawn lines.
    ///
    /// Screen splits at explicit newlines only; export also greedy-wraps at
    /// the maximum text width. The two can disagree for long lines.
    pub fn text_lines<F>(self, text: &str, measure: F) -> Vec<String>
    where
        F: Fn(&str) -> f64,
    {
        match self {
            Self::Screen => text::explicit_lines(text).into_iter().map(str::to_owned).collect(),
            Self::Export => text::wrap_for_export(text, measure),
        }
    }
}

/// Where each line of a text annotation goes, plus its backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlockLayout {
    pub lines: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub line_height: f64,
    pub backdrop: Rect,
}

impl TextBlockLayout {
    /// Top of line `index`.
    #[must_use]
    pub fn line_top(&self, index: usize) -> f64 {
        self.y + index as f64 * self.line_height
    }
}

/// Lay out a text annotation for `variant` using `measure` for line widths.
pub fn layout_text<F>(a: &TextAnnotation, variant: RenderVariant, measure: F) -> TextBlockLayout
where
    F: Fn(&str) -> f64,
{
    let lines = variant.text_lines(&a.text, &measure);
    let line_height = text::line_height(a.size);
    let widest = lines.iter().map(|l| measure(l.as_str())).fold(0.0_f64, f64::max);
    let backdrop = Rect::new(
        a.x - TEXT_PADDING,
        a.y - TEXT_PADDING,
        widest + TEXT_PADDING * 2.0,
        lines.len() as f64 * line_height + TEXT_PADDING * 2.0,
    );
    TextBlockLayout { lines, x: a.x, y: a.y, line_height, backdrop }
}

/// The non-interactive crop guide drawn over the screen canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    /// The full 16:9 frame.
    pub frame: Rect,
    /// Centred 1:1 region kept by square crops.
    pub square: Rect,
}

impl SafeZone {
    /// Guide geometry for a `width` x `height` canvas.
    #[must_use]
    pub fn for_canvas(width: f64, height: f64) -> Self {
        let side = width.min(height);
        let square = Rect::new((width - side) / 2.0, (height - side) / 2.0, side, side);
        Self { frame: Rect::new(0.0, 0.0, width, height), square }
    }

    /// Regions outside the square, dimmed on screen.
    #[must_use]
    pub fn outside_square(&self) -> [Rect; 2] {
        let f = self.frame;
        let s = self.square;
        if s.width < f.width {
            [
                Rect::new(f.x, f.y, s.x - f.x, f.height),
                Rect::new(s.x + s.width, f.y, f.x + f.width - (s.x + s.width), f.height),
            ]
        } else {
            [
                Rect::new(f.x, f.y, f.width, s.y - f.y),
                Rect::new(f.x, s.y + s.height, f.width, f.y + f.height - (s.y + s.height)),
            ]
        }
    }
}

/// Three-point polylines forming an L at each corner of `r`, clockwise from top-left.
#[must_use]
pub fn corner_brackets(r: Rect, len: f64) -> [[Point; 3]; 4] {
    let (l, t, rt, b) = (r.x, r.y, r.x + r.width, r.y + r.height);
    [
        [Point::new(l, t + len), Point::new(l, t), Point::new(l + len, t)],
        [Point::new(rt - len, t), Point::new(rt, t), Point::new(rt, t + len)],
        [Point::new(rt, b - len), Point::new(rt, b), Point::new(rt - len, b)],
        [Point::new(l + len, b), Point::new(l, b), Point::new(l, b - len)],
    ]
}
