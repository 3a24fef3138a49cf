//! Document model: annotation types and the per-slot annotation store.
//!
//! An [`Annotation`] is a tagged union over the two overlay kinds the editor
//! places on a photo. The store keeps them in z-order: later entries draw on
//! top and win hit-tests. Data flows in from persisted slot state and from
//! the interaction controller; the renderer reads it back in list order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    ICON_DEFAULT_SIZE, ICON_MAX_SIZE, ICON_MIN_SIZE, ROTATE_STEP_DEG, TEXT_DEFAULT_SIZE, TEXT_MAX_SIZE, TEXT_MIN_SIZE,
};
use crate::transform::Point;

/// Opaque identifier for an annotation, unique within its slot.
pub type AnnotationId = String;

/// Generate a fresh annotation id.
#[must_use]
pub fn new_id() -> AnnotationId {
    Uuid::new_v4().to_string()
}

/// The fixed set of safety icons an annotation can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Arrow,
    Circle,
    Crash,
    Warning,
    Injury,
    Cross,
}

impl IconKind {
    /// Every icon, in toolbar order.
    pub const ALL: [IconKind; 6] = [Self::Arrow, Self::Circle, Self::Crash, Self::Warning, Self::Injury, Self::Cross];

    /// Wire and asset name, e.g. `"warning"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Circle => "circle",
            Self::Crash => "crash",
            Self::Warning => "warning",
            Self::Injury => "injury",
            Self::Cross => "cross",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Discriminant of [`Annotation`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Icon,
    Text,
}

fn default_icon_size() -> f64 {
    ICON_DEFAULT_SIZE
}

fn default_text_size() -> f64 {
    TEXT_DEFAULT_SIZE
}

/// A safety icon centred on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconAnnotation {
    /// Missing ids are assigned when loaded into a store.
    #[serde(default)]
    pub id: AnnotationId,
    pub x: f64,
    pub y: f64,
    pub tool: IconKind,
    /// Edge length of the drawn square in canvas pixels.
    #[serde(default = "default_icon_size")]
    pub size: f64,
    /// Clockwise rotation in degrees about the centre.
    #[serde(default)]
    pub rot: f64,
}

/// A text label whose first line's top-left corner is `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// Missing ids are assigned when loaded into a store.
    #[serde(default)]
    pub id: AnnotationId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// Font size in canvas pixels.
    #[serde(default = "default_text_size")]
    pub size: f64,
}

/// A user-placed overlay on a slot image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Icon(IconAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    /// A new icon with default size and no rotation.
    #[must_use]
    pub fn icon(tool: IconKind, x: f64, y: f64) -> Self {
        Self::Icon(IconAnnotation { id: new_id(), x, y, tool, size: ICON_DEFAULT_SIZE, rot: 0.0 })
    }

    /// A new text label with default font size.
    #[must_use]
    pub fn text(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self::Text(TextAnnotation { id: new_id(), x, y, text: text.into(), size: TEXT_DEFAULT_SIZE })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Icon(a) => &a.id,
            Self::Text(a) => &a.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: AnnotationId) {
        match self {
            Self::Icon(a) => a.id = id,
            Self::Text(a) => a.id = id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Icon(_) => AnnotationKind::Icon,
            Self::Text(_) => AnnotationKind::Text,
        }
    }

    /// Anchor position: the centre for icons, the top-left for text.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Icon(a) => Point::new(a.x, a.y),
            Self::Text(a) => Point::new(a.x, a.y),
        }
    }

    pub fn set_position(&mut self, p: Point) {
        match self {
            Self::Icon(a) => {
                a.x = p.x;
                a.y = p.y;
            }
            Self::Text(a) => {
                a.x = p.x;
                a.y = p.y;
            }
        }
    }

    /// Icon edge length or font size.
    #[must_use]
    pub fn size(&self) -> f64 {
        match self {
            Self::Icon(a) => a.size,
            Self::Text(a) => a.size,
        }
    }

    /// Whether the annotation is drawn and hittable. Blank text is soft-deleted.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Icon(_) => true,
            Self::Text(a) => !crate::text::is_blank(&a.text),
        }
    }

    /// Add `delta` to the size, clamped to the per-kind range.
    pub fn change_size(&mut self, delta: f64) {
        match self {
            Self::Icon(a) => a.size = clamp_icon_size(a.size + delta),
            Self::Text(a) => a.size = clamp_text_size(a.size + delta),
        }
    }

    /// Rotate an icon by one step. Text is not rotatable; returns `false`.
    pub fn rotate(&mut self) -> bool {
        match self {
            Self::Icon(a) => {
                a.rot = next_rotation(a.rot);
                true
            }
            Self::Text(_) => false,
        }
    }

    /// Bring loaded values back into their valid ranges.
    pub(crate) fn normalize(&mut self) {
        match self {
            Self::Icon(a) => {
                a.size = clamp_icon_size(a.size);
                a.rot = if a.rot.is_finite() { a.rot.rem_euclid(360.0) } else { 0.0 };
            }
            Self::Text(a) => a.size = clamp_text_size(a.size),
        }
    }
}

fn clamp_icon_size(size: f64) -> f64 {
    if size.is_finite() { size.clamp(ICON_MIN_SIZE, ICON_MAX_SIZE) } else { ICON_DEFAULT_SIZE }
}

fn clamp_text_size(size: f64) -> f64 {
    if size.is_finite() { size.clamp(TEXT_MIN_SIZE, TEXT_MAX_SIZE) } else { TEXT_DEFAULT_SIZE }
}

/// Next rotation after one rotate step, wrapped into `[0, 360)`.
#[must_use]
pub fn next_rotation(rot: f64) -> f64 {
    (rot + ROTATE_STEP_DEG).rem_euclid(360.0)
}

/// Ordered annotations for one slot. Order is z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    items: Vec<Annotation>,
}

impl AnnotationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a store from loaded annotations, normalising values and
    /// re-assigning any id that repeats an earlier one.
    #[must_use]
    pub fn from_vec(items: Vec<Annotation>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(items.len());
        for mut a in items {
            a.normalize();
            if a.id().is_empty() || !seen.insert(a.id().to_owned()) {
                let id = new_id();
                seen.insert(id.clone());
                a.set_id(id);
            }
            out.push(a);
        }
        Self { items: out }
    }

    /// Append on top of the z-order.
    pub fn push(&mut self, annotation: Annotation) {
        self.items.push(annotation);
    }

    /// Remove an annotation by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let idx = self.items.iter().position(|a| a.id() == id)?;
        Some(self.items.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.items.iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        self.items.iter_mut().find(|a| a.id() == id)
    }

    /// All annotations bottom to top, including soft-deleted text.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.items.iter()
    }

    /// Drawable annotations bottom to top.
    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &Annotation> {
        self.items.iter().filter(|a| a.is_visible())
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Visible annotations, for persisting.
    #[must_use]
    pub fn to_saved(&self) -> Vec<Annotation> {
        self.visible().cloned().collect()
    }

    /// Number of annotations, including soft-deleted text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
