use crate::constants::{MAX_BACKGROUND_SCALE, MIN_BACKGROUND_SCALE};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Template {0} not found")]
    TemplateNotFound(TemplateId),
    #[error("Field {0} is not part of the template")]
    UnknownField(FieldId),
    #[error("Persistence failed: {0}")]
    Persistence(String),
    #[error("Print failed: {0}")]
    Print(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Stable identifier of a template field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FieldId(pub u64);

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a certificate template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct TemplateId(pub u64);

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Physical page of a template, derived from paper size and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Page {
    pub fn new(paper: PaperSize, orientation: Orientation) -> Self {
        let (width_mm, height_mm) = paper.dimensions_with_orientation(orientation);
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Largest origin a field may be dragged to, keeping `edge_margin_mm` free
    /// at the right and bottom edges.
    pub fn max_origin(&self, edge_margin_mm: f32) -> (f32, f32) {
        (
            (self.width_mm - edge_margin_mm).max(0.0),
            (self.height_mm - edge_margin_mm).max(0.0),
        )
    }

    /// Clamp a field origin into the draggable area.
    pub fn clamp_origin(&self, x: f32, y: f32, edge_margin_mm: f32) -> (f32, f32) {
        let (max_x, max_y) = self.max_origin(edge_margin_mm);
        (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
    }
}

/// Horizontal alignment of a field's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Writing direction of a field's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// One placeable text item on a certificate.
///
/// Geometry is always millimeters from the page's top-left corner, regardless
/// of the text direction of the certificate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TemplateField {
    pub id: FieldId,
    /// Semantic key of the data this field renders
    pub key: String,
    /// Operator-facing name; the key is used when absent
    pub label: Option<String>,
    pub position_x: f32,
    pub position_y: f32,
    /// Wrap width, only present on wrap-capable fields
    pub width: Option<f32>,
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    pub color: String,
    pub align: TextAlign,
    pub direction: TextDirection,
    pub visible: bool,
}

impl Default for TemplateField {
    fn default() -> Self {
        Self {
            id: FieldId(0),
            key: String::new(),
            label: None,
            position_x: 0.0,
            position_y: 0.0,
            width: None,
            font_name: "Helvetica".to_string(),
            font_size: 14.0,
            color: "#000000".to_string(),
            align: TextAlign::Left,
            direction: TextDirection::Ltr,
            visible: true,
        }
    }
}

impl TemplateField {
    pub fn new(id: u64, key: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: FieldId(id),
            key: key.into(),
            position_x: x,
            position_y: y,
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// Placement of the background artwork relative to the page box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BackgroundAlignment {
    /// Horizontal nudge in whole millimeters
    pub offset_x: i32,
    /// Vertical nudge in whole millimeters
    pub offset_y: i32,
    /// Combined scale percentage, mirrored by linked edits
    pub scale: f32,
    /// Horizontal scale percentage
    pub scale_x: f32,
    /// Vertical scale percentage
    pub scale_y: f32,
}

impl Default for BackgroundAlignment {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            scale: 100.0,
            scale_x: 100.0,
            scale_y: 100.0,
        }
    }
}

impl BackgroundAlignment {
    /// Copy with every scale clamped into the allowed percentage range.
    pub fn clamped(self) -> Self {
        Self {
            scale: clamp_scale(self.scale),
            scale_x: clamp_scale(self.scale_x),
            scale_y: clamp_scale(self.scale_y),
            ..self
        }
    }
}

pub(crate) fn clamp_scale(percent: f32) -> f32 {
    percent.clamp(MIN_BACKGROUND_SCALE, MAX_BACKGROUND_SCALE)
}

/// A committed field move, as recorded in the undo history
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub field_id: FieldId,
    pub field_name: String,
    pub old: (f32, f32),
    pub new: (f32, f32),
}

/// A certificate layout as supplied by the template loader
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Reference to the background artwork (path or URL), opaque to the engine
    pub background_image: Option<String>,
    pub background: BackgroundAlignment,
    pub fields: Vec<TemplateField>,
}

impl Template {
    pub fn page(&self) -> Page {
        Page::new(self.paper_size, self.orientation)
    }

    pub fn field(&self, id: FieldId) -> Option<&TemplateField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut TemplateField> {
        self.fields.iter_mut().find(|field| field.id == id)
    }
}
