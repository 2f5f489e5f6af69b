//! Screen projection of a template
//!
//! Pure geometry: field positions and background alignment in, pixel
//! rectangles out. The interactive canvas, the full-page preview and the
//! print path all go through these functions; at zoom 1 they produce the
//! exact geometry that gets printed.

use crate::editor::{FieldGeometry, FieldPositionStore};
use crate::types::{BackgroundAlignment, FieldId, Page};
use crate::units::RenderScale;

/// Screen placement of one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRect {
    pub field_id: FieldId,
    pub left_px: f32,
    pub top_px: f32,
    /// Wrap width, for fields that have one
    pub width_px: Option<f32>,
}

impl FieldRect {
    /// Convert back into page millimeters: (x, y, width)
    pub fn to_mm(&self, scale: RenderScale) -> (f32, f32, Option<f32>) {
        (
            scale.to_mm(self.left_px),
            scale.to_mm(self.top_px),
            self.width_px.map(|w| scale.to_mm(w)),
        )
    }
}

/// Placement of the background image inside the page box.
///
/// Size and inset are percentages of the page box; the inset keeps the image
/// centered as it grows or shrinks. The translation is applied afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundRect {
    pub left_percent: f32,
    pub top_percent: f32,
    pub width_percent: f32,
    pub height_percent: f32,
    pub translate_x_px: f32,
    pub translate_y_px: f32,
}

impl BackgroundRect {
    /// Absolute pixel box (left, top, width, height) within a page box of
    /// the given pixel size, translation included.
    pub fn to_px(&self, page_width_px: f32, page_height_px: f32) -> (f32, f32, f32, f32) {
        (
            page_width_px * self.left_percent / 100.0 + self.translate_x_px,
            page_height_px * self.top_percent / 100.0 + self.translate_y_px,
            page_width_px * self.width_percent / 100.0,
            page_height_px * self.height_percent / 100.0,
        )
    }
}

/// Everything needed to draw one frame of a template
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub scale: RenderScale,
    pub page_width_px: f32,
    pub page_height_px: f32,
    pub fields: Vec<FieldRect>,
    pub background: BackgroundRect,
}

impl Projection {
    pub fn field(&self, id: FieldId) -> Option<&FieldRect> {
        self.fields.iter().find(|rect| rect.field_id == id)
    }
}

pub fn project_field(id: FieldId, geometry: FieldGeometry, scale: RenderScale) -> FieldRect {
    FieldRect {
        field_id: id,
        left_px: scale.to_px(geometry.x),
        top_px: scale.to_px(geometry.y),
        width_px: geometry.width.map(|w| scale.to_px(w)),
    }
}

/// Project the background alignment.
///
/// The offset is a physical distance on the page, so it is converted with
/// the full render scale (zoom included) like every other millimeter value.
pub fn project_background(background: &BackgroundAlignment, scale: RenderScale) -> BackgroundRect {
    let background = background.clamped();
    BackgroundRect {
        left_percent: (100.0 - background.scale_x) / 2.0,
        top_percent: (100.0 - background.scale_y) / 2.0,
        width_percent: background.scale_x,
        height_percent: background.scale_y,
        translate_x_px: scale.to_px(background.offset_x as f32),
        translate_y_px: scale.to_px(background.offset_y as f32),
    }
}

/// Project an explicit set of field geometries.
pub fn project_geometry(
    page: &Page,
    fields: impl IntoIterator<Item = (FieldId, FieldGeometry)>,
    background: &BackgroundAlignment,
    scale: RenderScale,
) -> Projection {
    Projection {
        scale,
        page_width_px: scale.to_px(page.width_mm),
        page_height_px: scale.to_px(page.height_mm),
        fields: fields
            .into_iter()
            .map(|(id, geometry)| project_field(id, geometry, scale))
            .collect(),
        background: project_background(background, scale),
    }
}

/// Project every field of a store.
pub fn project(
    page: &Page,
    store: &FieldPositionStore,
    background: &BackgroundAlignment,
    scale: RenderScale,
) -> Projection {
    project_geometry(page, store.iter(), background, scale)
}
