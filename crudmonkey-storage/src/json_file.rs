//! JSON document store.
//!
//! The whole table set lives in one JSON file. Every successful write
//! rewrites the document through a temp file and rename, so a crash never
//! leaves a half-written file behind.

use crate::{Store, StoreResult, TableSet, UniqueConstraint};
use crudmonkey_core::{Record, RecordId, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    #[serde(flatten)]
    tables: TableSet,
}

/// File-backed store. Reads are served from memory.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: RwLock<TableSet>,
    constraints: Vec<UniqueConstraint>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tables = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| unavailable(&path, e))?;
            let document: Document =
                serde_json::from_str(&contents).map_err(|e| unavailable(&path, e))?;
            if document.version != FORMAT_VERSION {
                return Err(StoreError::Unavailable {
                    reason: format!(
                        "{}: unsupported format version {}",
                        path.display(),
                        document.version
                    ),
                });
            }
            document.tables
        } else {
            TableSet::new()
        };
        tracing::info!(path = %path.display(), "Opened JSON store");
        Ok(Self {
            path,
            tables: RwLock::new(tables),
            constraints: Vec::new(),
        })
    }

    pub fn with_constraints(mut self, constraints: Vec<UniqueConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether no table holds any record.
    pub fn is_empty(&self) -> bool {
        self.tables.read().map(|t| t.is_empty()).unwrap_or(true)
    }

    /// Apply `mutate` to a copy of the tables, persist it, then commit it.
    fn write_with<F>(&self, mutate: F) -> StoreResult<Record>
    where
        F: FnOnce(&mut TableSet) -> StoreResult<Record>,
    {
        let mut guard = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = guard.clone();
        let record = mutate(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(record)
    }

    fn persist(&self, tables: &TableSet) -> StoreResult<()> {
        let document = Document {
            version: FORMAT_VERSION,
            tables: tables.clone(),
        };
        let contents =
            serde_json::to_string_pretty(&document).map_err(|e| unavailable(&self.path, e))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| unavailable(&self.path, e))?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| unavailable(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| unavailable(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "Persisted JSON store");
        Ok(())
    }
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable {
        reason: format!("{}: {}", path.display(), err),
    }
}

impl Store for JsonFileStore {
    fn find_all(&self, table: &str) -> StoreResult<Vec<Record>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.find_all(table))
    }

    fn find_by_id(&self, table: &str, id: RecordId) -> StoreResult<Record> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        tables.find_by_id(table, id)
    }

    fn create(&self, record: Record) -> StoreResult<Record> {
        let now = chrono::Utc::now();
        self.write_with(|tables| tables.insert(record, now, &self.constraints))
    }

    fn update(&self, record: Record) -> StoreResult<Record> {
        let now = chrono::Utc::now();
        self.write_with(|tables| tables.replace(record, now, &self.constraints))
    }
}
