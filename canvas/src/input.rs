//! Input model: tools, pointer buttons, keys and the gesture state machine.
//!
//! `Tool` captures what a click on empty canvas does. `InputState` is the
//! gesture tracked between press and release, carrying the context needed to
//! compute incremental updates on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{AnnotationId, IconKind};
use crate::transform::{Point, Transform};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// No placement; clicks only select, drag and pan.
    #[default]
    Select,
    /// Place the given icon on click.
    Icon(IconKind),
    /// Request text from the host on click.
    Text,
}

impl Tool {
    /// Whether a click on empty canvas creates an annotation.
    #[must_use]
    pub fn is_placement(self) -> bool {
        !matches!(self, Self::Select)
    }

    /// Toolbar name: `"select"`, `"text"` or the icon name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Text => "text",
            Self::Icon(kind) => kind.name(),
        }
    }

    /// Parse a toolbar name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "select" | "" => Some(Self::Select),
            "text" => Some(Self::Text),
            other => IconKind::parse(other).map(Self::Icon),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer and toolbar.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected annotation, if any.
    pub selected_id: Option<AnnotationId>,
}

/// Internal state for the gesture state machine.
///
/// Only one of pan, annotation drag and pinch is ever active.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pressed on the background; not yet moved past the drag threshold.
    PendingPan {
        /// Canvas point of the press.
        start: Point,
        /// Pan anchor captured against the transform at press time.
        anchor: Point,
    },
    /// Dragging the image.
    Panning {
        /// Pointer offset from the image origin, captured at gesture start.
        anchor: Point,
    },
    /// Moving an annotation.
    DraggingAnnotation {
        /// Id of the annotation being dragged.
        id: AnnotationId,
        /// Pointer position minus annotation anchor at press time.
        offset: Point,
    },
    /// Two-finger pinch zoom.
    PinchZooming {
        /// Finger distance when the gesture started.
        start_dist: f64,
        /// Finger midpoint when the gesture started.
        start_mid: Point,
        /// Transform when the gesture started.
        start_transform: Transform,
    },
}

impl InputState {
    /// Short label for logging and assertions.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PendingPan { .. } => "pending_pan",
            Self::Panning { .. } => "panning",
            Self::DraggingAnnotation { .. } => "dragging_annotation",
            Self::PinchZooming { .. } => "pinch_zooming",
        }
    }
}
