//! crudmonkey Core - Record Schemas and Codecs
//!
//! Pure data structures and conversions with no I/O. The storage and TUI
//! crates depend on this one.
//!
//! - [`field`]: record type declarations and the field descriptor extractor
//! - [`codec`]: render/parse pairs per semantic type
//! - [`value`]: dynamically typed values and record instances

pub mod codec;
pub mod error;
pub mod field;
pub mod identity;
pub mod value;

pub use codec::{codec_for, is_supported, parse, render, Codec};
pub use error::{ConfigurationError, CrudError, CrudResult, ParseError, StoreError};
pub use field::{
    describe, title_case, Describable, FieldDef, FieldDescriptor, RecordType, TypeTag,
    IGNORE_MARKER, STORE_MANAGED_COLUMNS,
};
pub use identity::{new_record_id, RecordId, Timestamp};
pub use value::{Record, Value};
