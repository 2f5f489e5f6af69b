//! Fixed print layout handed to the print/export trigger

use super::projector::{BackgroundRect, FieldRect, Projection};
use crate::types::{Page, TemplateField, TemplateId};
use crate::units::RenderScale;

/// One field as it will be printed
#[derive(Debug, Clone, PartialEq)]
pub struct PrintField {
    /// Presentation and key of the field; geometry reflects the saved layout
    pub field: TemplateField,
    /// Placement at zoom 1
    pub rect: FieldRect,
}

impl PrintField {
    /// Field origin and width in page millimeters
    pub fn position_mm(&self, scale: RenderScale) -> (f32, f32, Option<f32>) {
        self.rect.to_mm(scale)
    }
}

/// The complete, committed layout of a template at print time
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob {
    pub template: TemplateId,
    pub template_name: String,
    pub page: Page,
    pub scale: RenderScale,
    pub background_image: Option<String>,
    pub background: BackgroundRect,
    /// Visible fields in template order
    pub fields: Vec<PrintField>,
}

impl PrintJob {
    /// Build a job from a zoom-1 projection and the template fields it covers.
    /// Hidden fields and fields missing from the projection are left out.
    pub fn from_projection(
        template: TemplateId,
        template_name: impl Into<String>,
        page: Page,
        background_image: Option<String>,
        projection: &Projection,
        fields: &[TemplateField],
    ) -> Self {
        let scale = projection.scale;
        let fields = fields
            .iter()
            .filter(|field| field.visible)
            .filter_map(|field| {
                let rect = *projection.field(field.id)?;
                let (x, y, width) = rect.to_mm(scale);
                let mut field = field.clone();
                field.position_x = x;
                field.position_y = y;
                field.width = width;
                Some(PrintField { field, rect })
            })
            .collect();

        Self {
            template,
            template_name: template_name.into(),
            page,
            scale,
            background_image,
            background: projection.background,
            fields,
        }
    }
}
