//! Field value resolution
//!
//! Turns a field and a data record into the string drawn at the field's
//! position. What a field shows depends on its classification; the layout
//! engine itself treats the result as opaque text.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::ports::FieldValueResolver;
use crate::types::{TemplateField, TextDirection};

/// One data record (e.g. a student row), keyed by field key
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataRecord {
    values: BTreeMap<String, String>,
}

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Text to draw plus an optional direction that overrides the field's own
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedValue {
    pub text: String,
    pub direction: Option<TextDirection>,
}

impl ResolvedValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            direction: None,
        }
    }

    pub fn rtl(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            direction: Some(TextDirection::Rtl),
        }
    }

    /// Direction to render with, given the field's configured direction
    pub fn effective_direction(&self, field: &TemplateField) -> TextDirection {
        self.direction.unwrap_or(field.direction)
    }
}

/// How dates are written on the certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "5 March 2024"
    Long,
    /// "05/03/2024"
    Numeric,
    /// Numeric with Eastern Arabic digits, right-to-left. The builtin-font PDF
    /// path draws these as ASCII digits.
    EasternArabic,
}

/// Classification of a field key
#[derive(Debug, Clone, PartialEq)]
pub enum FieldClass {
    /// Fixed text, independent of the record
    StaticText(String),
    /// A date stored as `YYYY-MM-DD` or `DD/MM/YYYY`
    Date(DateStyle),
    /// A stored code mapped to a display label
    EnumLabel(HashMap<String, String>),
    /// The record value as-is
    Raw,
}

/// Resolver driven by a key → classification table. Unclassified keys pass
/// the record value through.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedResolver {
    classes: HashMap<String, FieldClass>,
}

impl ClassifiedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(mut self, key: impl Into<String>, class: FieldClass) -> Self {
        self.classes.insert(key.into(), class);
        self
    }

    pub fn class_of(&self, key: &str) -> &FieldClass {
        self.classes.get(key).unwrap_or(&FieldClass::Raw)
    }
}

impl FieldValueResolver for ClassifiedResolver {
    fn resolve(&self, field: &TemplateField, record: &DataRecord) -> ResolvedValue {
        let raw = record.get(&field.key).unwrap_or_default();
        match self.class_of(&field.key) {
            FieldClass::StaticText(text) => ResolvedValue::text(text.clone()),
            FieldClass::Date(style) => resolve_date(raw, *style),
            FieldClass::EnumLabel(labels) => {
                ResolvedValue::text(labels.get(raw).map(String::as_str).unwrap_or(raw))
            }
            FieldClass::Raw => ResolvedValue::text(raw),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

fn resolve_date(raw: &str, style: DateStyle) -> ResolvedValue {
    // Unparseable dates are printed as stored.
    let Some(date) = parse_date(raw) else {
        return ResolvedValue::text(raw);
    };

    match style {
        DateStyle::Long => ResolvedValue::text(date.format("%-d %B %Y").to_string()),
        DateStyle::Numeric => ResolvedValue::text(date.format("%d/%m/%Y").to_string()),
        DateStyle::EasternArabic => {
            ResolvedValue::rtl(to_eastern_arabic_digits(&date.format("%d/%m/%Y").to_string()))
        }
    }
}

/// Replace ASCII digits with Eastern Arabic digits.
pub fn to_eastern_arabic_digits(text: &str) -> String {
    text.chars()
        .map(|ch| match ch.to_digit(10) {
            Some(digit) if ch.is_ascii_digit() => char::from_u32(0x0660 + digit).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str) -> TemplateField {
        TemplateField::new(1, key, 0.0, 0.0)
    }

    #[test]
    fn test_raw_passthrough_and_missing_values() {
        let resolver = ClassifiedResolver::new();
        let record = DataRecord::new().with("student_name", "Layla Haddad");
        assert_eq!(
            resolver.resolve(&field("student_name"), &record).text,
            "Layla Haddad"
        );
        assert_eq!(resolver.resolve(&field("missing"), &record).text, "");
    }

    #[test]
    fn test_date_styles() {
        let record = DataRecord::new().with("issue_date", "2024-03-05");
        let long =
            ClassifiedResolver::new().classify("issue_date", FieldClass::Date(DateStyle::Long));
        assert_eq!(long.resolve(&field("issue_date"), &record).text, "5 March 2024");

        let numeric =
            ClassifiedResolver::new().classify("issue_date", FieldClass::Date(DateStyle::Numeric));
        assert_eq!(numeric.resolve(&field("issue_date"), &record).text, "05/03/2024");

        let arabic = ClassifiedResolver::new()
            .classify("issue_date", FieldClass::Date(DateStyle::EasternArabic));
        let value = arabic.resolve(&field("issue_date"), &record);
        assert_eq!(value.text, "\u{660}\u{665}/\u{660}\u{663}/\u{662}\u{660}\u{662}\u{664}");
        assert_eq!(value.direction, Some(TextDirection::Rtl));
        assert_eq!(value.effective_direction(&field("issue_date")), TextDirection::Rtl);
    }

    #[test]
    fn test_unparseable_date_is_kept() {
        let record = DataRecord::new().with("issue_date", "spring 2024");
        let resolver =
            ClassifiedResolver::new().classify("issue_date", FieldClass::Date(DateStyle::Long));
        assert_eq!(resolver.resolve(&field("issue_date"), &record).text, "spring 2024");
    }

    #[test]
    fn test_enum_label_and_static_text() {
        let labels = HashMap::from([("bsc".to_string(), "Bachelor of Science".to_string())]);
        let resolver = ClassifiedResolver::new()
            .classify("degree", FieldClass::EnumLabel(labels))
            .classify("heading", FieldClass::StaticText("Certificate".to_string()));
        let record = DataRecord::new().with("degree", "bsc");

        assert_eq!(
            resolver.resolve(&field("degree"), &record).text,
            "Bachelor of Science"
        );
        assert_eq!(resolver.resolve(&field("heading"), &record).text, "Certificate");

        let unknown = DataRecord::new().with("degree", "phd");
        assert_eq!(resolver.resolve(&field("degree"), &unknown).text, "phd");
    }
}
