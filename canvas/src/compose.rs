//! Grid compositor: lays 1-3 slot images into a 1080x1080 bitmap.
//!
//! Runs on plain RGBA buffers so the same code serves the browser bundle and
//! the native CLI. [`GridSession`] tracks slot uploads and edited bitmaps and
//! regenerates the composite whenever anything changes.

#[cfg(test)]
#[path = "compose_test.rs"]
mod compose_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::consts::{GRID_OUTER_RADIUS, GRID_SIZE};
use crate::grid::{GridLayout, INSET_BORDER_COLOR, Region};
use crate::state::{SLOT_COUNT, SlotId};

/// Prefix of the PNG data URIs written to form fields.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Compositor failures.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("no layout for {0} images")]
    ImageCount(usize),
    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("png encode failed: {0}")]
    Encode(#[source] image::ImageError),
    #[error("malformed data uri: {0}")]
    DataUri(String),
    #[error("invalid colour {0:?}")]
    Color(String),
}

/// Compositor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Fill behind the regions. Transparent by default.
    pub background: [u8; 4],
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self { background: [0, 0, 0, 0] }
    }
}

/// A generated composite and the layout actually used.
#[derive(Debug, Clone)]
pub struct Composite {
    pub layout: GridLayout,
    pub image: RgbaImage,
}

impl Composite {
    /// Encode as a PNG data URI.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Encode`] if PNG encoding fails.
    pub fn to_data_uri(&self) -> Result<String, ComposeError> {
        to_data_uri(&self.image)
    }
}

/// Composite slot images into the requested layout.
///
/// `slots[0]` is slot 1 (main), `slots[1]` slot 2 and `slots[2]` slot 3.
/// The layout is resolved from the number of populated slots; a layout that
/// does not fit falls back to the first valid one. Regions whose slot is
/// empty are skipped. Regions are cover-cropped and drawn in ascending z; the
/// finished square is clipped to rounded outer corners.
///
/// # Errors
///
/// Returns [`ComposeError::ImageCount`] when no slot is populated or more
/// than three slots are passed.
pub fn compose(
    requested: Option<GridLayout>,
    slots: &[Option<&RgbaImage>],
    options: &ComposeOptions,
) -> Result<Composite, ComposeError> {
    if slots.len() > SLOT_COUNT {
        return Err(ComposeError::ImageCount(slots.len()));
    }
    let count = slots.iter().flatten().count();
    let layout = GridLayout::resolve(requested, count).ok_or(ComposeError::ImageCount(count))?;
    let mut canvas = RgbaImage::from_pixel(GRID_SIZE, GRID_SIZE, Rgba(options.background));

    for region in layout.regions() {
        let Some(src) = slots.get(region.key.image_index()).copied().flatten() else {
            log::debug!("region {} has no image", region.key.name());
            continue;
        };
        draw_region(&mut canvas, region, src);
    }

    clip_rounded(&mut canvas, GRID_OUTER_RADIUS);
    Ok(Composite { layout, image: canvas })
}

/// Scale and centre-crop `src` to exactly `width` x `height`.
///
/// Returns `None` for empty images or regions.
#[must_use]
pub fn cover_crop(src: &RgbaImage, width: u32, height: u32) -> Option<RgbaImage> {
    let (iw, ih) = src.dimensions();
    if iw == 0 || ih == 0 || width == 0 || height == 0 {
        return None;
    }
    let scale = (f64::from(width) / f64::from(iw)).max(f64::from(height) / f64::from(ih));
    let crop_w = to_px(f64::from(width) / scale).clamp(1, iw);
    let crop_h = to_px(f64::from(height) / scale).clamp(1, ih);
    let crop_x = (iw - crop_w) / 2;
    let crop_y = (ih - crop_h) / 2;
    let cropped = imageops::crop_imm(src, crop_x, crop_y, crop_w, crop_h).to_image();
    Some(imageops::resize(&cropped, width, height, FilterType::Triangle))
}

fn draw_region(canvas: &mut RgbaImage, region: &Region, src: &RgbaImage) {
    let Some(tile) = cover_crop(src, region.width, region.height) else {
        log::debug!("skipping empty image for region {}", region.key.name());
        return;
    };
    let radius = f64::from(region.radius);
    let border = f64::from(region.border);
    let (w, h) = (f64::from(region.width), f64::from(region.height));

    for (tx, ty, px) in tile.enumerate_pixels() {
        let (cx, cy) = (region.x + tx, region.y + ty);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let (fx, fy) = (f64::from(tx) + 0.5, f64::from(ty) + 0.5);
        let outer = rounded_coverage(fx, fy, 0.0, 0.0, w, h, radius);
        if outer <= 0.0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        blend(dst, *px, outer);
        if border > 0.0 {
            let inner =
                rounded_coverage(fx, fy, border, border, w - border * 2.0, h - border * 2.0, (radius - border).max(0.0));
            let ring = (outer - inner).max(0.0);
            if ring > 0.0 {
                blend(dst, Rgba(INSET_BORDER_COLOR), ring);
            }
        }
    }
}

/// Multiply alpha by a full-canvas rounded-rect mask.
fn clip_rounded(canvas: &mut RgbaImage, radius: f64) {
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    for (x, y, px) in canvas.enumerate_pixels_mut() {
        let coverage = rounded_coverage(f64::from(x) + 0.5, f64::from(y) + 0.5, 0.0, 0.0, w, h, radius);
        if coverage < 1.0 {
            px.0[3] = to_channel(f64::from(px.0[3]) * coverage);
        }
    }
}

/// Approximate fraction of the pixel centred at `(px, py)` inside the
/// rounded rect `(x, y, w, h, r)`, with a one pixel anti-aliased edge.
fn rounded_coverage(px: f64, py: f64, x: f64, y: f64, w: f64, h: f64, r: f64) -> f64 {
    if w <= 0.0 || h <= 0.0 {
        return 0.0;
    }
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    // Distance to the nearest edge, negative inside.
    let qx = (px - (x + w / 2.0)).abs() - (w / 2.0 - r);
    let qy = (py - (y + h / 2.0)).abs() - (h / 2.0 - r);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let dist = outside + qx.max(qy).min(0.0) - r;
    (0.5 - dist).clamp(0.0, 1.0)
}

/// Source-over blend of `src` scaled by `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f64) {
    let sa = f64::from(src.0[3]) / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = f64::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let sc = f64::from(src.0[i]);
        let dc = f64::from(dst.0[i]);
        dst.0[i] = to_channel((sc * sa + dc * da * (1.0 - sa)) / out_a);
    }
    dst.0[3] = to_channel(out_a * 255.0);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}

// =============================================================
// Encoding
// =============================================================

/// Encode an image as a PNG data URI.
///
/// # Errors
///
/// Returns [`ComposeError::Encode`] if PNG encoding fails.
pub fn to_data_uri(img: &RgbaImage) -> Result<String, ComposeError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).map_err(ComposeError::Encode)?;
    Ok(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(&bytes)))
}

/// Decode a base64 image data URI (PNG or JPEG) to RGBA.
///
/// # Errors
///
/// Returns [`ComposeError::DataUri`] when the URI is not base64 image data
/// and [`ComposeError::Decode`] when the payload is not a readable image.
pub fn decode_data_uri(uri: &str) -> Result<RgbaImage, ComposeError> {
    let rest = uri.trim().strip_prefix("data:").ok_or_else(|| ComposeError::DataUri("missing data: scheme".into()))?;
    let (mime, payload) =
        rest.split_once(";base64,").ok_or_else(|| ComposeError::DataUri("not base64 encoded".into()))?;
    if !mime.starts_with("image/") {
        return Err(ComposeError::DataUri(format!("unsupported media type {mime:?}")));
    }
    let bytes = STANDARD.decode(payload.trim()).map_err(|e| ComposeError::DataUri(e.to_string()))?;
    decode_bytes(&bytes)
}

/// Decode encoded image bytes to RGBA.
///
/// # Errors
///
/// Returns [`ComposeError::Decode`] when the bytes are not a readable image.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage, ComposeError> {
    image::load_from_memory(bytes).map(|img| img.to_rgba8()).map_err(ComposeError::Decode)
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
///
/// # Errors
///
/// Returns [`ComposeError::Color`] for anything else.
pub fn parse_color(raw: &str) -> Result<[u8; 4], ComposeError> {
    let err = || ComposeError::Color(raw.to_owned());
    let hex = raw.trim().strip_prefix('#').ok_or_else(err)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(err());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
    match hex.len() {
        3 => {
            let mut out = [255; 4];
            for (i, c) in hex.chars().enumerate() {
                let v = channel(&c.to_string())?;
                out[i] = v * 17;
            }
            Ok(out)
        }
        6 | 8 => {
            let mut out = [255; 4];
            for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
                let s = std::str::from_utf8(chunk).map_err(|_| err())?;
                out[i] = channel(s)?;
            }
            Ok(out)
        }
        _ => Err(err()),
    }
}

// =============================================================
// Grid session
// =============================================================

/// Uploaded image for one slot plus its latest edited export.
#[derive(Debug, Clone)]
pub struct SlotImage {
    pub raw: RgbaImage,
    pub edited: Option<RgbaImage>,
}

impl SlotImage {
    /// The edited bitmap when there is one, else the upload.
    #[must_use]
    pub fn source(&self) -> &RgbaImage {
        self.edited.as_ref().unwrap_or(&self.raw)
    }
}

/// Slot images and the selected layout, with the last generated composite.
#[derive(Debug, Default)]
pub struct GridSession {
    slots: [Option<SlotImage>; SLOT_COUNT],
    selected: Option<GridLayout>,
    options: ComposeOptions,
    output: Option<Composite>,
}

impl GridSession {
    #[must_use]
    pub fn new(options: ComposeOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Number of populated slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Layouts valid for the current image count.
    #[must_use]
    pub fn options(&self) -> &'static [GridLayout] {
        GridLayout::options_for(self.count())
    }

    /// Layout of the current composite.
    #[must_use]
    pub fn layout(&self) -> Option<GridLayout> {
        self.output.as_ref().map(|c| c.layout)
    }

    /// The current composite, if any image is present.
    #[must_use]
    pub fn composite(&self) -> Option<&Composite> {
        self.output.as_ref()
    }

    #[must_use]
    pub fn slot(&self, slot: SlotId) -> Option<&SlotImage> {
        self.slots[slot.index()].as_ref()
    }

    /// Upload a raw image into a slot, dropping any previous edit.
    pub fn set_image(&mut self, slot: SlotId, raw: RgbaImage) -> Option<GridLayout> {
        self.slots[slot.index()] = Some(SlotImage { raw, edited: None });
        self.regenerate()
    }

    /// Empty a slot.
    pub fn remove_image(&mut self, slot: SlotId) -> Option<GridLayout> {
        self.slots[slot.index()] = None;
        self.regenerate()
    }

    /// Record an edited export for a populated slot. Ignored for empty slots.
    pub fn set_edited(&mut self, slot: SlotId, edited: RgbaImage) -> Option<GridLayout> {
        match self.slots[slot.index()].as_mut() {
            Some(s) => s.edited = Some(edited),
            None => {
                log::debug!("edited image for empty slot {} ignored", slot.number());
                return self.layout();
            }
        }
        self.regenerate()
    }

    /// Record an edited export from its data URI.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError`] when the URI cannot be decoded; the slot is
    /// left unchanged.
    pub fn set_edited_data_uri(&mut self, slot: SlotId, uri: &str) -> Result<Option<GridLayout>, ComposeError> {
        let img = decode_data_uri(uri)?;
        Ok(self.set_edited(slot, img))
    }

    /// Choose a layout; an invalid choice falls back to the default.
    pub fn select_layout(&mut self, layout: GridLayout) -> Option<GridLayout> {
        self.selected = Some(layout);
        self.regenerate()
    }

    /// Rebuild the composite, each slot feeding its own region.
    pub fn regenerate(&mut self) -> Option<GridLayout> {
        let images: Vec<Option<&RgbaImage>> =
            self.slots.iter().map(|s| s.as_ref().map(SlotImage::source)).collect();
        self.output = match compose(self.selected, &images, &self.options) {
            Ok(c) => Some(c),
            Err(e) => {
                log::debug!("no composite: {e}");
                None
            }
        };
        self.layout()
    }

    /// Values for the `grid-layout` and `grid-bitmap` fields.
    ///
    /// Both are empty when there are no images.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Encode`] if PNG encoding fails.
    pub fn to_fields(&self) -> Result<(String, String), ComposeError> {
        match &self.output {
            Some(c) => Ok((c.layout.id().to_owned(), c.to_data_uri()?)),
            None => Ok((String::new(), String::new())),
        }
    }
}
