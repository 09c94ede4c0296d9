//! Identity types for crudmonkey records

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Primary key of a stored record.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type RecordId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 RecordId (timestamp-sortable).
pub fn new_record_id() -> RecordId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_id_is_v7() {
        let id = new_record_id();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_new_record_ids_are_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
    }
}
