//! Persisted per-slot editor state and the hidden form fields that carry it.
//!
//! Each slot saves `{ transform, annotations }`. The surrounding form stores
//! the transform alone in `image{N}-transform` and the full slot state under
//! key `image{N}` of one shared JSON blob. Loading is lenient: malformed
//! pieces are dropped and logged, never fatal, so an editor always opens.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::doc::Annotation;
use crate::transform::Transform;

/// Hidden field holding the composed grid bitmap data URI.
pub const GRID_BITMAP_FIELD: &str = "grid-bitmap";

/// Hidden field holding the chosen grid layout id.
pub const GRID_LAYOUT_FIELD: &str = "grid-layout";

/// Number of image slots on a report.
pub const SLOT_COUNT: usize = 3;

/// Error returned by strict state decoding.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The payload is not valid JSON for the expected shape.
    #[error("invalid slot state JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Slot numbers run from 1 to 3.
    #[error("slot number out of range: {0}")]
    SlotOutOfRange(usize),
    /// A transform with a non-positive or non-finite component.
    #[error("invalid transform: x={x}, y={y}, scale={scale}")]
    InvalidTransform { x: f64, y: f64, scale: f64 },
}

/// One of the three image slots. Slot 1 is the main image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub const MAIN: SlotId = SlotId(1);
    pub const ALL: [SlotId; SLOT_COUNT] = [SlotId(1), SlotId(2), SlotId(3)];

    /// Slot from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::SlotOutOfRange`] outside `1..=3`.
    pub fn new(number: usize) -> Result<Self, StateError> {
        if (1..=SLOT_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(StateError::SlotOutOfRange(number))
        }
    }

    /// 1-based slot number.
    #[must_use]
    pub fn number(self) -> usize {
        self.0
    }

    /// 0-based index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 - 1
    }

    /// Key of this slot in the shared state blob, e.g. `image2`.
    #[must_use]
    pub fn key(self) -> String {
        format!("image{}", self.0)
    }

    /// Hidden field holding this slot's transform.
    #[must_use]
    pub fn transform_field(self) -> String {
        format!("image{}-transform", self.0)
    }

    /// Hidden field holding this slot's edited bitmap data URI.
    #[must_use]
    pub fn edited_field(self) -> String {
        format!("image{}-edited-data", self.0)
    }

    fn from_key(key: &str) -> Option<Self> {
        match key.strip_prefix("image").map(str::parse::<usize>) {
            Some(Ok(n)) if (1..=SLOT_COUNT).contains(&n) => Some(Self(n)),
            _ => None,
        }
    }
}

/// Saved editor state for one slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    /// `None` means "cover-fit when the image loads".
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl SlotState {
    /// Strict decode.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Json`] for malformed input and
    /// [`StateError::InvalidTransform`] for an unusable transform.
    pub fn from_json(raw: &str) -> Result<Self, StateError> {
        let state: Self = serde_json::from_str(raw)?;
        if let Some(t) = state.transform {
            validate_transform(t)?;
        }
        Ok(state)
    }

    /// Decode whatever is usable: an invalid transform becomes `None` and
    /// malformed annotations are dropped individually.
    #[must_use]
    pub fn from_value_lenient(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            log::warn!("slot state is not an object; using defaults");
            return Self::default();
        };
        let transform = obj.get("transform").and_then(transform_from_value);
        let annotations = match obj.get("annotations") {
            Some(Value::Array(items)) => items.iter().filter_map(annotation_from_value).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                log::warn!("slot annotations is not an array; dropping");
                Vec::new()
            }
        };
        Self { transform, annotations }
    }

    /// Lenient decode from a raw string. Unparseable input yields defaults.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(v) => Self::from_value_lenient(&v),
            Err(e) => {
                log::warn!("slot state JSON unreadable ({e}); using defaults");
                Self::default()
            }
        }
    }

    /// Encode for the hidden form field.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn validate_transform(t: Transform) -> Result<Transform, StateError> {
    if t.is_valid() { Ok(t) } else { Err(StateError::InvalidTransform { x: t.x, y: t.y, scale: t.scale }) }
}

fn transform_from_value(value: &Value) -> Option<Transform> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<Transform>(value.clone()) {
        Ok(t) => match validate_transform(t) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("{e}; falling back to cover fit");
                None
            }
        },
        Err(e) => {
            log::warn!("transform unreadable ({e}); falling back to cover fit");
            None
        }
    }
}

fn annotation_from_value(value: &Value) -> Option<Annotation> {
    match serde_json::from_value::<Annotation>(value.clone()) {
        Ok(a) => Some(a),
        Err(e) => {
            log::warn!("dropping malformed annotation: {e}");
            None
        }
    }
}

/// Lenient decode of an `image{N}-transform` field.
#[must_use]
pub fn parse_transform_lenient(raw: &str) -> Option<Transform> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(v) => transform_from_value(&v),
        Err(e) => {
            log::warn!("transform field unreadable ({e}); falling back to cover fit");
            None
        }
    }
}

/// The shared per-record blob mapping `image{N}` to slot state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageStates {
    slots: BTreeMap<SlotId, SlotState>,
}

impl ImageStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient decode of the whole blob. Unknown keys are ignored.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("image state blob unreadable ({e}); starting empty");
                return Self::default();
            }
        };
        let Some(obj) = value.as_object() else {
            log::warn!("image state blob is not an object; starting empty");
            return Self::default();
        };
        let slots = obj
            .iter()
            .filter_map(|(k, v)| SlotId::from_key(k).map(|slot| (slot, SlotState::from_value_lenient(v))))
            .collect();
        Self { slots }
    }

    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&SlotState> {
        self.slots.get(&slot)
    }

    pub fn set(&mut self, slot: SlotId, state: SlotState) {
        self.slots.insert(slot, state);
    }

    pub fn remove(&mut self, slot: SlotId) -> Option<SlotState> {
        self.slots.remove(&slot)
    }

    /// Encode as `{"image1": {...}, ...}`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StateError> {
        let mut map = Map::new();
        for (slot, state) in &self.slots {
            map.insert(slot.key(), serde_json::to_value(state)?);
        }
        Ok(serde_json::to_string(&Value::Object(map))?)
    }
}
