//! Shared numeric constants for the canvas crate.

// ── Canvas surfaces ─────────────────────────────────────────────

/// Logical width of the editor canvas (16:9).
pub const EDITOR_WIDTH: f64 = 1920.0;

/// Logical height of the editor canvas (16:9).
pub const EDITOR_HEIGHT: f64 = 1080.0;

/// Editor canvas element size in pixels.
pub const EDITOR_WIDTH_PX: u32 = 1920;
pub const EDITOR_HEIGHT_PX: u32 = 1080;

/// Side of the square grid compositor canvas.
pub const GRID_SIZE: u32 = 1080;

/// Outer corner radius clipping the whole grid bitmap.
pub const GRID_OUTER_RADIUS: f64 = 24.0;

// ── Transform ───────────────────────────────────────────────────

/// Smallest scale any zoom operation may produce.
pub const MIN_SCALE: f64 = 0.1;

/// Largest scale any zoom operation may produce.
pub const MAX_SCALE: f64 = 10.0;

/// Scale delta applied per wheel notch or toolbar zoom step.
pub const ZOOM_STEP: f64 = 0.1;

// ── Annotations ─────────────────────────────────────────────────

pub const ICON_DEFAULT_SIZE: f64 = 140.0;
pub const ICON_MIN_SIZE: f64 = 20.0;
pub const ICON_MAX_SIZE: f64 = 500.0;
pub const ICON_SIZE_STEP: f64 = 20.0;

/// Rotation increment in degrees for the rotate action.
pub const ROTATE_STEP_DEG: f64 = 45.0;

pub const TEXT_DEFAULT_SIZE: f64 = 32.0;
pub const TEXT_MIN_SIZE: f64 = 12.0;
pub const TEXT_MAX_SIZE: f64 = 200.0;
pub const TEXT_SIZE_STEP: f64 = 4.0;

// ── Text layout ─────────────────────────────────────────────────

/// Estimated glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.3;

/// Padding around a text block's backdrop and hit box.
pub const TEXT_PADDING: f64 = 12.0;

/// Lower bound of the estimated text block width.
pub const TEXT_MIN_WIDTH: f64 = 140.0;

/// Upper bound of the estimated text block width, and the export wrap width.
pub const TEXT_MAX_WIDTH: f64 = 980.0;

// ── Input ───────────────────────────────────────────────────────

/// Movement in CSS-independent canvas pixels before a press becomes a pan.
pub const DRAG_THRESHOLD_PX: f64 = 2.0;
