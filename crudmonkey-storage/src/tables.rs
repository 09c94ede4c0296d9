//! Table set shared by the memory and file stores.

use crate::UniqueConstraint;
use crudmonkey_core::{new_record_id, Record, RecordId, StoreError, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records grouped by table, each table in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    tables: BTreeMap<String, Vec<Record>>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_all(&self, table: &str) -> Vec<Record> {
        self.tables.get(table).cloned().unwrap_or_default()
    }

    pub fn find_by_id(&self, table: &str, id: RecordId) -> Result<Record, StoreError> {
        self.tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| r.id == Some(id)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
                id,
            })
    }

    /// Insert a new record, assigning id and timestamps when absent.
    pub fn insert(
        &mut self,
        mut record: Record,
        now: Timestamp,
        constraints: &[UniqueConstraint],
    ) -> Result<Record, StoreError> {
        let id = record.id.unwrap_or_else(new_record_id);
        let rows = self.tables.entry(record.table.clone()).or_default();
        if rows.iter().any(|r| r.id == Some(id)) {
            return Err(StoreError::InsertFailed {
                table: record.table.clone(),
                reason: format!("record {} already exists", id),
            });
        }
        check_unique(rows, &record, None, constraints)?;

        record.id = Some(id);
        record.created_at = Some(record.created_at.unwrap_or(now));
        record.updated_at = Some(now);
        rows.push(record.clone());
        Ok(record)
    }

    /// Replace the values of an existing record, keeping its creation time.
    pub fn replace(
        &mut self,
        mut record: Record,
        now: Timestamp,
        constraints: &[UniqueConstraint],
    ) -> Result<Record, StoreError> {
        let id = record.id.ok_or_else(|| StoreError::MissingId {
            table: record.table.clone(),
        })?;
        let not_found = || StoreError::NotFound {
            table: record.table.clone(),
            id,
        };
        let rows = self.tables.get_mut(&record.table).ok_or_else(not_found)?;
        let index = rows
            .iter()
            .position(|r| r.id == Some(id))
            .ok_or_else(not_found)?;
        check_unique(rows, &record, Some(id), constraints)?;

        record.created_at = rows[index].created_at;
        record.updated_at = Some(now);
        rows[index] = record.clone();
        Ok(record)
    }

    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

fn check_unique(
    rows: &[Record],
    record: &Record,
    skip_id: Option<RecordId>,
    constraints: &[UniqueConstraint],
) -> Result<(), StoreError> {
    for constraint in constraints.iter().filter(|c| c.table == record.table) {
        let value = record.get(&constraint.column);
        if value.is_null() {
            continue;
        }
        let clash = rows
            .iter()
            .filter(|r| skip_id.is_none() || r.id != skip_id)
            .any(|r| r.get(&constraint.column) == value);
        if clash {
            return Err(StoreError::ConstraintViolation {
                table: record.table.clone(),
                column: constraint.column.clone(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn widget(name: &str) -> Record {
        Record::new("widgets").with_value("name", name)
    }

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let mut set = TableSet::new();
        let now = Utc::now();
        let stored = set.insert(widget("bolt"), now, &[]).unwrap();

        assert!(stored.id.is_some());
        assert_eq!(stored.created_at, Some(now));
        assert_eq!(stored.updated_at, Some(now));
        assert_eq!(set.len("widgets"), 1);
    }

    #[test]
    fn test_find_all_preserves_insertion_order() {
        let mut set = TableSet::new();
        for name in ["c", "a", "b"] {
            set.insert(widget(name), Utc::now(), &[]).unwrap();
        }
        let names: Vec<String> = set
            .find_all("widgets")
            .iter()
            .map(|r| r.get("name").to_string())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_replace_keeps_created_at() {
        let mut set = TableSet::new();
        let created = Utc::now();
        let stored = set.insert(widget("bolt"), created, &[]).unwrap();

        let mut edited = stored.clone().with_value("name", "nut");
        edited.created_at = None;
        let later = created + chrono::Duration::seconds(5);
        let updated = set.replace(edited, later, &[]).unwrap();

        assert_eq!(updated.created_at, Some(created));
        assert_eq!(updated.updated_at, Some(later));
        assert_eq!(set.len("widgets"), 1);
    }

    #[test]
    fn test_replace_unknown_id_is_not_found() {
        let mut set = TableSet::new();
        let record = widget("ghost").with_id(new_record_id());
        assert!(matches!(
            set.replace(record, Utc::now(), &[]),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_unique_constraint_skips_self_on_replace() {
        let constraints = vec![UniqueConstraint::new("widgets", "name")];
        let mut set = TableSet::new();
        let stored = set.insert(widget("bolt"), Utc::now(), &constraints).unwrap();

        assert!(matches!(
            set.insert(widget("bolt"), Utc::now(), &constraints),
            Err(StoreError::ConstraintViolation { .. })
        ));
        assert!(set.replace(stored, Utc::now(), &constraints).is_ok());
    }
}
