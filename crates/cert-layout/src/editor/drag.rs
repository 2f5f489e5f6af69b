//! Drag session state machine
//!
//! A session lives between pointer-down and pointer-up on one field. While
//! active it only computes a preview position; the editor decides what to
//! do with the result when the session finishes.

use super::snap::{SnapGuide, SnapTarget, snap_position};
use crate::types::{FieldId, Page};
use crate::units::{RenderScale, round_to_step};

/// Pointer position in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Limits applied to every preview position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConstraints {
    pub page: Page,
    pub edge_margin_mm: f32,
    pub snap_threshold_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    field_id: FieldId,
    pointer_start: PointerPos,
    field_start: (f32, f32),
    preview: (f32, f32),
    guides: Vec<SnapGuide>,
}

/// How a drag session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The field ended somewhere else than it started
    Moved {
        field_id: FieldId,
        from: (f32, f32),
        to: (f32, f32),
    },
    /// The pointer came back to (or never left) the start position
    Unchanged { field_id: FieldId },
}

impl DragSession {
    pub fn start(field_id: FieldId, pointer: PointerPos, field_start: (f32, f32)) -> Self {
        Self {
            field_id,
            pointer_start: pointer,
            field_start,
            preview: field_start,
            guides: Vec::new(),
        }
    }

    pub fn field_id(&self) -> FieldId {
        self.field_id
    }

    pub fn field_start(&self) -> (f32, f32) {
        self.field_start
    }

    pub fn preview(&self) -> (f32, f32) {
        self.preview
    }

    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    /// Recompute the preview for a new pointer position.
    ///
    /// `scale` must be the live render scale: the pixel delta is converted
    /// with whatever zoom the canvas has now, not the one at session start.
    pub fn update(
        &mut self,
        pointer: PointerPos,
        scale: RenderScale,
        constraints: &DragConstraints,
        targets: &[SnapTarget],
    ) -> (f32, f32) {
        let dx = scale.to_mm(pointer.x - self.pointer_start.x);
        let dy = scale.to_mm(pointer.y - self.pointer_start.y);

        let x = round_to_step(self.field_start.0 + dx);
        let y = round_to_step(self.field_start.1 + dy);
        let (x, y) = constraints
            .page
            .clamp_origin(x, y, constraints.edge_margin_mm);

        let snapped = snap_position(x, y, targets, constraints.snap_threshold_mm);
        // A neighbor may itself sit outside the draggable area.
        self.preview =
            constraints
                .page
                .clamp_origin(snapped.x, snapped.y, constraints.edge_margin_mm);
        self.guides = snapped.guides;
        self.preview
    }

    pub fn has_moved(&self) -> bool {
        self.preview != self.field_start
    }

    pub fn finish(self) -> DragOutcome {
        if self.has_moved() {
            DragOutcome::Moved {
                field_id: self.field_id,
                from: self.field_start,
                to: self.preview,
            }
        } else {
            DragOutcome::Unchanged {
                field_id: self.field_id,
            }
        }
    }
}
