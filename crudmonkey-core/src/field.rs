//! Record type schemas and the field descriptor extractor.
//!
//! A record type declares its fields once through [`Describable`]. The
//! extractor ([`describe`]) keeps the user-editable subset in declaration
//! order; list and form builders share the resulting descriptors read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted names the store manages itself. Never user-editable.
pub const STORE_MANAGED_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Explicit "ignore" marker for a persisted name.
pub const IGNORE_MARKER: &str = "-";

/// Semantic kind of a field. Drives codec selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Identifier,
    /// A declared type with no codec. Rejected at registration.
    Other(String),
}

impl TypeTag {
    pub fn name(&self) -> &str {
        match self {
            TypeTag::String => "string",
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::Boolean => "boolean",
            TypeTag::Timestamp => "timestamp",
            TypeTag::Identifier => "identifier",
            TypeTag::Other(name) => name,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field as declared on a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Source identifier, e.g. `published_at` or `PublishedAt`.
    pub name: &'static str,
    /// Persisted column name; `None` when the field is untagged.
    pub persisted_name: Option<&'static str>,
    pub type_tag: TypeTag,
    pub nullable: bool,
}

impl FieldDef {
    /// A required field persisted under `persisted_name`.
    pub fn new(name: &'static str, persisted_name: &'static str, type_tag: TypeTag) -> Self {
        Self {
            name,
            persisted_name: Some(persisted_name),
            type_tag,
            nullable: false,
        }
    }

    /// A field with no persisted name. Excluded from descriptors.
    pub fn untagged(name: &'static str, type_tag: TypeTag) -> Self {
        Self {
            name,
            persisted_name: None,
            type_tag,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Whether the extractor keeps this field.
    pub fn is_editable(&self) -> bool {
        match self.persisted_name {
            None => false,
            Some(column) => {
                !column.is_empty()
                    && column != IGNORE_MARKER
                    && !STORE_MANAGED_COLUMNS.contains(&column)
            }
        }
    }
}

/// Metadata for one editable field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub persisted_name: String,
    pub semantic_type: TypeTag,
    pub nullable: bool,
}

impl FieldDescriptor {
    /// Human label derived from the persisted name: `published_at` -> `Published At`.
    pub fn label(&self) -> String {
        title_case(&self.persisted_name)
    }
}

/// Capability interface for record types exposed as resources.
pub trait Describable {
    /// Store table backing this record type.
    fn table() -> &'static str;

    /// Every declared field in declaration order, store-managed ones included.
    fn fields() -> Vec<FieldDef>;
}

/// A record type definition, detached from the Rust type that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    pub table: &'static str,
    pub fields: Vec<FieldDef>,
}

impl RecordType {
    pub fn of<T: Describable>() -> Self {
        Self {
            table: T::table(),
            fields: T::fields(),
        }
    }
}

/// Editable field descriptors of `record_type`, in declaration order.
///
/// Drops fields that are untagged, ignored (`-`), or store-managed. Pure;
/// unsupported types are reported by registration, not here.
pub fn describe(record_type: &RecordType) -> Vec<FieldDescriptor> {
    record_type
        .fields
        .iter()
        .filter(|field| field.is_editable())
        .filter_map(|field| {
            field.persisted_name.map(|column| FieldDescriptor {
                name: field.name.to_string(),
                persisted_name: column.to_string(),
                semantic_type: field.type_tag.clone(),
                nullable: field.nullable,
            })
        })
        .collect()
}

/// `blog_posts` -> `Blog Posts`.
pub fn title_case(snake: &str) -> String {
    snake
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Persisted names mixing excluded markers with ordinary columns.
    fn arb_persisted_name() -> impl Strategy<Value = Option<&'static str>> {
        prop::sample::select(vec![
            None,
            Some(""),
            Some("-"),
            Some("id"),
            Some("created_at"),
            Some("updated_at"),
            Some("name"),
            Some("count"),
            Some("email"),
            Some("published_at"),
        ])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: exactly the excluded persisted names are dropped, order preserved
        #[test]
        fn prop_describe_excludes_exactly_managed_fields(
            columns in prop::collection::vec(arb_persisted_name(), 0..12)
        ) {
            let fields: Vec<FieldDef> = columns
                .iter()
                .map(|column| FieldDef {
                    name: "field",
                    persisted_name: *column,
                    type_tag: TypeTag::String,
                    nullable: false,
                })
                .collect();
            let record_type = RecordType { table: "t", fields };

            let expected: Vec<&str> = columns
                .iter()
                .filter_map(|c| *c)
                .filter(|c| !["", "-", "id", "created_at", "updated_at"].contains(c))
                .collect();
            let actual: Vec<String> = describe(&record_type)
                .into_iter()
                .map(|d| d.persisted_name)
                .collect();

            prop_assert_eq!(actual, expected);
        }
    }
}
