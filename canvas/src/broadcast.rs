//! Toolbar state snapshots and the per-frame broadcast throttle.
//!
//! Discrete changes (tool, selection, drop) are published immediately.
//! Drag-in-progress snapshots go through [`FrameThrottle`], which coalesces
//! them so the host publishes at most one per animation frame.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use serde::Serialize;

use crate::doc::{Annotation, AnnotationId, AnnotationKind};

/// What the toolbar needs to know about the selected annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedInfo {
    pub id: AnnotationId,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Icon rotation; absent for text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot: Option<f64>,
    /// Text content; absent for icons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl From<&Annotation> for SelectedInfo {
    fn from(a: &Annotation) -> Self {
        let (rot, text) = match a {
            Annotation::Icon(icon) => (Some(icon.rot), None),
            Annotation::Text(t) => (None, Some(t.text.clone())),
        };
        let pos = a.position();
        Self { id: a.id().to_owned(), kind: a.kind(), x: pos.x, y: pos.y, size: a.size(), rot, text }
    }
}

/// Editor state published to listening toolbars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorSnapshot {
    /// Active tool name.
    pub tool: String,
    /// Selected annotation, if any.
    pub selected: Option<SelectedInfo>,
    /// Whether an annotation drag is in progress.
    pub dragging: bool,
}

/// Coalesces high-frequency snapshots to one per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Option<EditorSnapshot>,
    frame_requested: bool,
}

impl FrameThrottle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest snapshot. Returns `true` when the caller must
    /// schedule a frame; `false` when one is already outstanding.
    pub fn offer(&mut self, snapshot: EditorSnapshot) -> bool {
        self.pending = Some(snapshot);
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Called from the animation frame: release the latest snapshot.
    pub fn flush(&mut self) -> Option<EditorSnapshot> {
        self.frame_requested = false;
        self.pending.take()
    }

    /// Drop any pending snapshot; an immediate broadcast supersedes it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a snapshot is waiting for the next frame.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
