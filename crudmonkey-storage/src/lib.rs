//! crudmonkey Storage - Store Trait and Implementations
//!
//! Defines the data-store collaborator the TUI talks to. Each call is a
//! complete, independent request; no transaction spans calls.

pub mod json_file;
pub mod memory;
pub mod tables;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use tables::TableSet;

use crudmonkey_core::{Record, RecordId, StoreError};
use serde::{Deserialize, Serialize};

/// Result type alias for store calls.
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Synchronous record store, shared read-only-by-contract across resources.
pub trait Store: Send + Sync {
    /// All records of a table, in insertion order.
    fn find_all(&self, table: &str) -> StoreResult<Vec<Record>>;

    /// One record by primary key.
    fn find_by_id(&self, table: &str, id: RecordId) -> StoreResult<Record>;

    /// Insert a new record. Returns it with id and timestamps assigned.
    fn create(&self, record: Record) -> StoreResult<Record>;

    /// Replace an existing record's values. Returns the stored record.
    fn update(&self, record: Record) -> StoreResult<Record>;
}

/// A column whose non-null values must be distinct within a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueConstraint {
    pub table: String,
    pub column: String,
}

impl UniqueConstraint {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// A store call as seen by [`MemoryStore`]'s journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    FindAll { table: String },
    FindById { table: String, id: RecordId },
    Create { table: String },
    Update { table: String, id: Option<RecordId> },
}

impl StoreOp {
    pub fn is_write(&self) -> bool {
        matches!(self, StoreOp::Create { .. } | StoreOp::Update { .. })
    }
}
