//! Resize session state machine
//!
//! Width-only counterpart of the drag session. The resulting width has a
//! lower bound but is not clamped against the page: wrapped text may run
//! close to the page edge.

use crate::types::FieldId;
use crate::units::{RenderScale, round_to_step};

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    field_id: FieldId,
    pointer_start_x: f32,
    start_width: f32,
    preview_width: f32,
}

/// How a resize session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    Resized {
        field_id: FieldId,
        from: f32,
        to: f32,
    },
    Unchanged {
        field_id: FieldId,
    },
}

impl ResizeSession {
    /// Start resizing. Fields without a width start from `default_width_mm`.
    pub fn start(
        field_id: FieldId,
        pointer_x: f32,
        current_width: Option<f32>,
        default_width_mm: f32,
    ) -> Self {
        let start_width = current_width.unwrap_or(default_width_mm);
        Self {
            field_id,
            pointer_start_x: pointer_x,
            start_width,
            preview_width: start_width,
        }
    }

    pub fn field_id(&self) -> FieldId {
        self.field_id
    }

    pub fn start_width(&self) -> f32 {
        self.start_width
    }

    pub fn preview_width(&self) -> f32 {
        self.preview_width
    }

    pub fn update(&mut self, pointer_x: f32, scale: RenderScale, min_width_mm: f32) -> f32 {
        let delta = scale.to_mm(pointer_x - self.pointer_start_x);
        self.preview_width = round_to_step(self.start_width + delta).max(min_width_mm);
        self.preview_width
    }

    pub fn finish(self) -> ResizeOutcome {
        if self.preview_width != self.start_width {
            ResizeOutcome::Resized {
                field_id: self.field_id,
                from: self.start_width,
                to: self.preview_width,
            }
        } else {
            ResizeOutcome::Unchanged {
                field_id: self.field_id,
            }
        }
    }
}
