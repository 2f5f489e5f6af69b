//! Field position store
//!
//! The single authoritative copy of every field's geometry while a template
//! is open. Mutations here are local: nothing is persisted or recorded in
//! the history until the editor decides to.

use std::collections::BTreeMap;

use crate::types::{FieldId, TemplateField};

/// Geometry of one field in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGeometry {
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
}

impl FieldGeometry {
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl From<&TemplateField> for FieldGeometry {
    fn from(field: &TemplateField) -> Self {
        Self {
            x: field.position_x,
            y: field.position_y,
            width: field.width,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldPositionStore {
    current: BTreeMap<FieldId, FieldGeometry>,
    baseline: BTreeMap<FieldId, FieldGeometry>,
}

impl FieldPositionStore {
    /// Seed a store from persisted template fields.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a TemplateField>) -> Self {
        let baseline: BTreeMap<_, _> = fields
            .into_iter()
            .map(|field| (field.id, FieldGeometry::from(field)))
            .collect();
        Self {
            current: baseline.clone(),
            baseline,
        }
    }

    /// Replace all state with a fresh seed, as on template (re)open.
    pub fn reseed<'a>(&mut self, fields: impl IntoIterator<Item = &'a TemplateField>) {
        *self = Self::from_fields(fields);
    }

    pub fn get(&self, id: FieldId) -> Option<FieldGeometry> {
        self.current.get(&id).copied()
    }

    pub fn baseline(&self, id: FieldId) -> Option<FieldGeometry> {
        self.baseline.get(&id).copied()
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.current.contains_key(&id)
    }

    /// Iterate current geometry in field id order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, FieldGeometry)> + '_ {
        self.current.iter().map(|(id, geometry)| (*id, *geometry))
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Move a field. Returns false for unknown fields.
    pub fn set(&mut self, id: FieldId, x: f32, y: f32) -> bool {
        match self.current.get_mut(&id) {
            Some(geometry) => {
                geometry.x = x;
                geometry.y = y;
                true
            }
            None => false,
        }
    }

    /// Change a field's wrap width. Returns false for unknown fields.
    pub fn set_width(&mut self, id: FieldId, width: f32) -> bool {
        match self.current.get_mut(&id) {
            Some(geometry) => {
                geometry.width = Some(width);
                true
            }
            None => false,
        }
    }

    /// Restore every field to its baseline.
    pub fn reset_all(&mut self) {
        self.current = self.baseline.clone();
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.baseline
    }

    /// Fields whose current geometry differs from the baseline, in id order
    pub fn dirty_fields(&self) -> Vec<(FieldId, FieldGeometry, FieldGeometry)> {
        self.current
            .iter()
            .filter_map(|(id, current)| {
                let baseline = self.baseline.get(id)?;
                (current != baseline).then_some((*id, *baseline, *current))
            })
            .collect()
    }

    /// Accept a field's current geometry as its new baseline after it was persisted.
    pub fn mark_saved(&mut self, id: FieldId) {
        if let Some(current) = self.current.get(&id) {
            self.baseline.insert(id, *current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FieldPositionStore {
        let fields = vec![
            TemplateField::new(1, "student_name", 20.0, 30.0),
            TemplateField::new(2, "thesis_title", 20.0, 60.0).with_width(120.0),
        ];
        FieldPositionStore::from_fields(&fields)
    }

    #[test]
    fn test_seeded_from_fields() {
        let store = store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(FieldId(1)).unwrap().position(), (20.0, 30.0));
        assert_eq!(store.get(FieldId(2)).unwrap().width, Some(120.0));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_is_local_and_reset_restores() {
        let mut store = store();
        assert!(store.set(FieldId(1), 40.0, 30.0));
        assert!(store.set_width(FieldId(2), 90.0));
        assert!(!store.set(FieldId(9), 1.0, 1.0));
        assert!(store.is_dirty());
        assert_eq!(store.dirty_fields().len(), 2);
        assert_eq!(store.baseline(FieldId(1)).unwrap().position(), (20.0, 30.0));

        store.reset_all();
        assert!(!store.is_dirty());
        assert_eq!(store.get(FieldId(1)).unwrap().position(), (20.0, 30.0));
        assert_eq!(store.get(FieldId(2)).unwrap().width, Some(120.0));
    }

    #[test]
    fn test_mark_saved_moves_baseline() {
        let mut store = store();
        store.set(FieldId(1), 40.0, 30.0);
        store.mark_saved(FieldId(1));
        assert!(!store.is_dirty());
        store.reset_all();
        assert_eq!(store.get(FieldId(1)).unwrap().position(), (40.0, 30.0));
    }
}
