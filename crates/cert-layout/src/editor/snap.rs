//! Neighbor snapping for dragged fields
//!
//! A candidate origin snaps, per axis, to the left (x) or top (y) edge of
//! another field when it is closer than the snap threshold. The nearest edge
//! wins; equal distances go to the lower field id, so a given candidate
//! always resolves to the same target.

use crate::types::FieldId;

/// Orientation of a snap guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// Vertical line at a shared x (left edges aligned)
    Vertical,
    /// Horizontal line at a shared y (top edges aligned)
    Horizontal,
}

/// An active alignment guide shown while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub axis: GuideAxis,
    /// Position of the guide line in millimeters
    pub position_mm: f32,
    /// The field the dragged field is aligned with
    pub field_id: FieldId,
}

/// Origin of another field a drag may snap to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub field_id: FieldId,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub x: f32,
    pub y: f32,
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    pub fn is_snapped(&self) -> bool {
        !self.guides.is_empty()
    }
}

/// Snap a candidate origin against the other fields.
///
/// Every target sharing the winning coordinate gets a guide, in id order.
pub fn snap_position(x: f32, y: f32, targets: &[SnapTarget], threshold_mm: f32) -> SnapResult {
    let mut guides = Vec::new();

    let snapped_x = snap_axis(x, targets, threshold_mm, |t| t.x);
    if let Some(value) = snapped_x {
        guides.extend(aligned_guides(targets, GuideAxis::Vertical, value, |t| t.x));
    }

    let snapped_y = snap_axis(y, targets, threshold_mm, |t| t.y);
    if let Some(value) = snapped_y {
        guides.extend(aligned_guides(targets, GuideAxis::Horizontal, value, |t| t.y));
    }

    SnapResult {
        x: snapped_x.unwrap_or(x),
        y: snapped_y.unwrap_or(y),
        guides,
    }
}

fn snap_axis(
    value: f32,
    targets: &[SnapTarget],
    threshold_mm: f32,
    edge: impl Fn(&SnapTarget) -> f32,
) -> Option<f32> {
    targets
        .iter()
        .map(|target| ((edge(target) - value).abs(), target.field_id, edge(target)))
        .filter(|(distance, _, _)| *distance < threshold_mm)
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, _, position)| position)
}

fn aligned_guides(
    targets: &[SnapTarget],
    axis: GuideAxis,
    position_mm: f32,
    edge: impl Fn(&SnapTarget) -> f32,
) -> Vec<SnapGuide> {
    let mut guides: Vec<SnapGuide> = targets
        .iter()
        .filter(|target| edge(*target) == position_mm)
        .map(|target| SnapGuide {
            axis,
            position_mm,
            field_id: target.field_id,
        })
        .collect();
    guides.sort_by_key(|guide| guide.field_id);
    guides
}
