//! Dynamically typed field values and records.

use crate::{RecordId, Timestamp};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single field value as held by a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(Timestamp),
    Identifier(RecordId),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Identifier(id) => write!(f, "{}", id.hyphenated()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::Identifier(id)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A record instance belonging to one store table.
///
/// Store-managed columns (`id`, `created_at`, `updated_at`) are kept apart from
/// the user-editable `values`, which are keyed by persisted name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub table: String,
    pub id: Option<RecordId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub values: BTreeMap<String, Value>,
}

impl Record {
    /// An unsaved record with no values.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            id: None,
            created_at: None,
            updated_at: None,
            values: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_value(mut self, persisted_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(persisted_name.into(), value.into());
        self
    }

    pub fn set(&mut self, persisted_name: impl Into<String>, value: Value) {
        self.values.insert(persisted_name.into(), value);
    }

    /// Value for a persisted name; missing columns read as `Null`.
    pub fn get(&self, persisted_name: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(persisted_name).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_display_null_is_empty() {
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_display_timestamp_is_rfc3339_utc() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(Value::Timestamp(ts).to_string(), "2024-03-09T14:05:00Z");
    }

    #[test]
    fn test_record_get_missing_is_null() {
        let record = Record::new("widgets").with_value("name", "bolt");
        assert_eq!(record.get("name"), &Value::String("bolt".to_string()));
        assert!(record.get("count").is_null());
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<i64> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Integer(3));
    }

    #[test]
    fn test_value_serde_shape() {
        let json = serde_json::to_value(Value::Integer(12)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "integer", "value": 12}));
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, Value::Integer(12));
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let record = Record::new("widgets")
            .with_id(Uuid::nil())
            .with_value("name", "bolt")
            .with_value("count", 12i64)
            .with_value("note", Value::Null);
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
