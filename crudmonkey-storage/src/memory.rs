//! In-memory store for tests and demos.

use crate::{Store, StoreOp, StoreResult, TableSet, UniqueConstraint};
use crudmonkey_core::{Record, RecordId, StoreError};
use std::sync::{Arc, Mutex, RwLock};

/// In-memory store with an operation journal and one-shot failure injection.
///
/// Clones share the same tables, so a test can keep a handle while the TUI
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<TableSet>>,
    constraints: Arc<RwLock<Vec<UniqueConstraint>>>,
    journal: Arc<RwLock<Vec<StoreOp>>>,
    fail_next: Arc<Mutex<Option<StoreError>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique(self, table: &str, column: &str) -> Self {
        if let Ok(mut constraints) = self.constraints.write() {
            constraints.push(UniqueConstraint::new(table, column));
        }
        self
    }

    /// Make the next call fail with `error`, whatever it is.
    pub fn fail_next(&self, error: StoreError) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(error);
        }
    }

    /// Every call received so far, in order.
    pub fn journal(&self) -> Vec<StoreOp> {
        self.journal.read().map(|j| j.clone()).unwrap_or_default()
    }

    /// Number of Create/Update calls received so far.
    pub fn write_count(&self) -> usize {
        self.journal().iter().filter(|op| op.is_write()).count()
    }

    pub fn clear_journal(&self) {
        if let Ok(mut journal) = self.journal.write() {
            journal.clear();
        }
    }

    /// Number of records in a table.
    pub fn count(&self, table: &str) -> usize {
        self.tables.read().map(|t| t.len(table)).unwrap_or(0)
    }

    /// Snapshot of the whole table set.
    pub fn snapshot(&self) -> StoreResult<TableSet> {
        Ok(self.tables.read().map_err(|_| StoreError::LockPoisoned)?.clone())
    }

    fn record(&self, op: StoreOp) -> StoreResult<()> {
        self.journal
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(op);
        let injected = self
            .fail_next
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .take();
        match injected {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn constraints(&self) -> StoreResult<Vec<UniqueConstraint>> {
        Ok(self
            .constraints
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone())
    }
}

impl Store for MemoryStore {
    fn find_all(&self, table: &str) -> StoreResult<Vec<Record>> {
        self.record(StoreOp::FindAll {
            table: table.to_string(),
        })?;
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.find_all(table))
    }

    fn find_by_id(&self, table: &str, id: RecordId) -> StoreResult<Record> {
        self.record(StoreOp::FindById {
            table: table.to_string(),
            id,
        })?;
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        tables.find_by_id(table, id)
    }

    fn create(&self, record: Record) -> StoreResult<Record> {
        self.record(StoreOp::Create {
            table: record.table.clone(),
        })?;
        let constraints = self.constraints()?;
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        tables.insert(record, chrono::Utc::now(), &constraints)
    }

    fn update(&self, record: Record) -> StoreResult<Record> {
        self.record(StoreOp::Update {
            table: record.table.clone(),
            id: record.id,
        })?;
        let constraints = self.constraints()?;
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        tables.replace(record, chrono::Utc::now(), &constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudmonkey_core::{new_record_id, Value};

    fn make_widget(name: &str, count: i64) -> Record {
        Record::new("widgets")
            .with_value("name", name)
            .with_value("count", count)
    }

    #[test]
    fn test_create_then_find_by_id() {
        let store = MemoryStore::new();
        let stored = store.create(make_widget("bolt", 12)).unwrap();
        let id = stored.id.unwrap();

        let found = store.find_by_id("widgets", id).unwrap();
        assert_eq!(found.get("count"), &Value::Integer(12));
    }

    #[test]
    fn test_find_by_id_missing() {
        let store = MemoryStore::new();
        let result = store.find_by_id("widgets", new_record_id());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_find_all_unknown_table_is_empty() {
        let store = MemoryStore::new();
        assert!(store.find_all("nothing").unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_values() {
        let store = MemoryStore::new();
        let stored = store.create(make_widget("bolt", 12)).unwrap();

        let edited = Record {
            values: make_widget("bolt", 40).values,
            ..stored.clone()
        };
        store.update(edited).unwrap();

        let all = store.find_all("widgets").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get("count"), &Value::Integer(40));
        assert_eq!(all[0].created_at, stored.created_at);
    }

    #[test]
    fn test_update_without_id_fails() {
        let store = MemoryStore::new();
        let result = store.update(make_widget("bolt", 1));
        assert!(matches!(result, Err(StoreError::MissingId { .. })));
    }

    #[test]
    fn test_journal_records_calls_in_order() {
        let store = MemoryStore::new();
        let stored = store.create(make_widget("bolt", 12)).unwrap();
        store.find_all("widgets").unwrap();
        store.update(stored.clone()).unwrap();

        let journal = store.journal();
        assert_eq!(journal.len(), 3);
        assert!(matches!(journal[0], StoreOp::Create { .. }));
        assert!(matches!(journal[1], StoreOp::FindAll { .. }));
        assert!(matches!(journal[2], StoreOp::Update { .. }));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_fail_next_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next(StoreError::Unavailable {
            reason: "connection reset".to_string(),
        });

        assert!(store.find_all("widgets").is_err());
        assert!(store.find_all("widgets").is_ok());
    }

    #[test]
    fn test_failed_create_leaves_store_unchanged() {
        let store = MemoryStore::new();
        store.fail_next(StoreError::Unavailable {
            reason: "down".to_string(),
        });
        assert!(store.create(make_widget("bolt", 1)).is_err());
        assert_eq!(store.count("widgets"), 0);
    }

    #[test]
    fn test_unique_constraint_violation() {
        let store = MemoryStore::new().with_unique("widgets", "name");
        store.create(make_widget("bolt", 1)).unwrap();
        let result = store.create(make_widget("bolt", 2));
        assert!(matches!(result, Err(StoreError::ConstraintViolation { .. })));
        assert_eq!(store.count("widgets"), 1);
    }

    #[test]
    fn test_clones_share_tables() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.create(make_widget("bolt", 1)).unwrap();
        assert_eq!(handle.count("widgets"), 1);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: find_all returns every created record in creation order
        #[test]
        fn prop_find_all_matches_creates(names in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let store = MemoryStore::new();
            for name in &names {
                store.create(Record::new("widgets").with_value("name", name.as_str())).unwrap();
            }
            let listed: Vec<String> = store
                .find_all("widgets")
                .unwrap()
                .iter()
                .map(|r| r.get("name").to_string())
                .collect();
            prop_assert_eq!(listed, names);
        }
    }
}
