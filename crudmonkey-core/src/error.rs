//! Error types for crudmonkey operations

use crate::RecordId;
use thiserror::Error;

/// Data-store errors. Recovered locally by the view that issued the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found in {table} with id {id}")]
    NotFound { table: String, id: RecordId },

    #[error("Insert failed for {table}: {reason}")]
    InsertFailed { table: String, reason: String },

    #[error("Update of {table} requires a record id")]
    MissingId { table: String },

    #[error("Constraint violation on {table}.{column}: value {value:?} already exists")]
    ConstraintViolation {
        table: String,
        column: String,
        value: String,
    },

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Operator-entered text that does not match a field's semantic type.
/// Never propagated past the form's Save action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("a value is required")]
    Required,

    #[error("{text:?} is not a whole number: {reason}")]
    InvalidInteger { text: String, reason: String },

    #[error("{text:?} is not a finite decimal number")]
    InvalidFloat { text: String },

    #[error("{text:?} is not a boolean (use true/false or yes/no)")]
    InvalidBoolean { text: String },

    #[error("{text:?} is not a timestamp (use RFC 3339, YYYY-MM-DD HH:MM:SS or YYYY-MM-DD)")]
    InvalidTimestamp { text: String },

    #[error("{text:?} is not an identifier: {reason}")]
    InvalidIdentifier { text: String, reason: String },

    #[error("no codec for type {type_name}")]
    Unsupported { type_name: String },
}

/// Registration-time schema errors. Fatal: a broken model is never partially served.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Resource name must not be empty")]
    EmptyResourceName,

    #[error("Resource name {name:?} is reserved")]
    ReservedResourceName { name: String },

    #[error("Field {resource}.{field} has unsupported type {type_name}")]
    UnsupportedFieldType {
        resource: String,
        field: String,
        type_name: String,
    },

    #[error("Field {resource}.{field} is declared more than once")]
    DuplicateField { resource: String, field: String },
}

/// Master error type for all crudmonkey errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrudError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Result type alias for crudmonkey operations.
pub type CrudResult<T> = Result<T, CrudError>;
