use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Editor configuration shared by every session of the layout engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EditorOptions {
    // Rendering
    pub base_scale: f32,

    // Dragging
    pub snap_threshold_mm: f32,
    pub edge_margin_mm: f32,

    // Resizing
    pub min_field_width_mm: f32,
    pub default_field_width_mm: f32,
    /// Field keys of long-form text fields that may be resized
    pub resizable_keys: Vec<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            base_scale: BASE_SCALE,
            snap_threshold_mm: SNAP_THRESHOLD_MM,
            edge_margin_mm: EDGE_MARGIN_MM,
            min_field_width_mm: MIN_FIELD_WIDTH_MM,
            default_field_width_mm: DEFAULT_FIELD_WIDTH_MM,
            resizable_keys: [
                "thesis_title",
                "research_title",
                "course_name",
                "program_name",
                "remarks",
                "address",
            ]
            .iter()
            .map(|key| key.to_string())
            .collect(),
        }
    }
}

impl EditorOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.base_scale > 0.0) {
            return Err(LayoutError::Config(
                "Base scale must be greater than zero".to_string(),
            ));
        }

        if self.snap_threshold_mm < 0.0 {
            return Err(LayoutError::Config(
                "Snap threshold cannot be negative".to_string(),
            ));
        }

        if self.edge_margin_mm < 0.0 {
            return Err(LayoutError::Config(
                "Edge margin cannot be negative".to_string(),
            ));
        }

        if !(self.min_field_width_mm > 0.0) {
            return Err(LayoutError::Config(
                "Minimum field width must be greater than zero".to_string(),
            ));
        }

        if self.default_field_width_mm < self.min_field_width_mm {
            return Err(LayoutError::Config(format!(
                "Default field width {}mm is below the minimum of {}mm",
                self.default_field_width_mm, self.min_field_width_mm
            )));
        }

        Ok(())
    }

    /// Whether fields with this key may be resized
    pub fn is_resizable(&self, key: &str) -> bool {
        self.resizable_keys.iter().any(|k| k == key)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    impl Serialize for PaperSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                PaperSize::A3 => serializer.serialize_str("A3"),
                PaperSize::A4 => serializer.serialize_str("A4"),
                PaperSize::A5 => serializer.serialize_str("A5"),
                PaperSize::Letter => serializer.serialize_str("Letter"),
                PaperSize::Legal => serializer.serialize_str("Legal"),
                PaperSize::Tabloid => serializer.serialize_str("Tabloid"),
                PaperSize::Custom {
                    width_mm,
                    height_mm,
                } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_mm", width_mm)?;
                    s.serialize_field("height_mm", height_mm)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for PaperSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct PaperSizeVisitor;

            impl<'de> Visitor<'de> for PaperSizeVisitor {
                type Value = PaperSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a paper size name or custom dimensions")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<PaperSize, E>
                where
                    E: de::Error,
                {
                    match value.to_ascii_uppercase().as_str() {
                        "A3" => Ok(PaperSize::A3),
                        "A4" => Ok(PaperSize::A4),
                        "A5" => Ok(PaperSize::A5),
                        "LETTER" => Ok(PaperSize::Letter),
                        "LEGAL" => Ok(PaperSize::Legal),
                        "TABLOID" => Ok(PaperSize::Tabloid),
                        _ => Err(de::Error::unknown_variant(
                            value,
                            &["A3", "A4", "A5", "Letter", "Legal", "Tabloid", "Custom"],
                        )),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<PaperSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_mm: Option<f32> = None;
                    let mut height_mm: Option<f32> = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_mm" => width_mm = Some(map.next_value()?),
                            "height_mm" => height_mm = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_mm, height_mm) {
                        (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Ok(PaperSize::Custom {
                            width_mm: w,
                            height_mm: h,
                        }),
                        (Some(_), Some(_)) => Err(de::Error::custom(
                            "custom paper dimensions must be positive",
                        )),
                        _ => Err(de::Error::missing_field("width_mm or height_mm")),
                    }
                }
            }

            deserializer.deserialize_any(PaperSizeVisitor)
        }
    }
}
