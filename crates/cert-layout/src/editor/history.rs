//! Undo history of committed field moves
//!
//! Only position moves are recorded. Width changes from resizing go straight
//! into the store and are not undoable.

use super::store::FieldPositionStore;
use crate::types::ChangeRecord;

#[derive(Debug, Clone, Default)]
pub struct ChangeHistory {
    records: Vec<ChangeRecord>,
}

impl ChangeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    /// Undo the most recent move, writing its old position back into the
    /// store. Returns the undone record, or None when there is nothing to undo.
    pub fn undo_last(&mut self, store: &mut FieldPositionStore) -> Option<ChangeRecord> {
        let record = self.records.pop()?;
        store.set(record.field_id, record.old.0, record.old.1);
        Some(record)
    }

    /// Drop all history and put every field back at its baseline.
    pub fn reset_all(&mut self, store: &mut FieldPositionStore) {
        self.records.clear();
        store.reset_all();
    }

    /// Forget the history without touching positions, after the moves were persisted.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn has_pending(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records, oldest first
    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldId, TemplateField};

    fn record(id: u64, old: (f32, f32), new: (f32, f32)) -> ChangeRecord {
        ChangeRecord {
            field_id: FieldId(id),
            field_name: format!("field {id}"),
            old,
            new,
        }
    }

    fn store() -> FieldPositionStore {
        FieldPositionStore::from_fields(&[
            TemplateField::new(1, "a", 10.0, 10.0),
            TemplateField::new(2, "b", 50.0, 50.0),
        ])
    }

    #[test]
    fn test_undo_is_last_in_first_out() {
        let mut store = store();
        let mut history = ChangeHistory::new();

        store.set(FieldId(1), 20.0, 10.0);
        history.push(record(1, (10.0, 10.0), (20.0, 10.0)));
        store.set(FieldId(1), 30.0, 15.0);
        history.push(record(1, (20.0, 10.0), (30.0, 15.0)));

        let undone = history.undo_last(&mut store).unwrap();
        assert_eq!(undone.new, (30.0, 15.0));
        assert_eq!(store.get(FieldId(1)).unwrap().position(), (20.0, 10.0));

        history.undo_last(&mut store).unwrap();
        assert_eq!(store.get(FieldId(1)).unwrap().position(), (10.0, 10.0));
        assert!(history.undo_last(&mut store).is_none());
        assert!(!history.has_pending());
    }

    #[test]
    fn test_reset_all_is_idempotent() {
        let mut store = store();
        let mut history = ChangeHistory::new();
        store.set(FieldId(2), 70.0, 70.0);
        history.push(record(2, (50.0, 50.0), (70.0, 70.0)));

        history.reset_all(&mut store);
        let once: Vec<_> = store.iter().collect();
        history.reset_all(&mut store);
        let twice: Vec<_> = store.iter().collect();

        assert_eq!(once, twice);
        assert!(history.is_empty());
        assert_eq!(store.get(FieldId(2)).unwrap().position(), (50.0, 50.0));
    }
}
