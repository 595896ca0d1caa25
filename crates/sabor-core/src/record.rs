//! Persisted aggregate envelope with identity and auditing timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Anything that exposes the store-assigned identity of an entity.
pub trait Identified {
    /// Returns the entity identifier.
    fn id(&self) -> EntityId;
}

/// A persisted aggregate: identity, auditing envelope and domain fields.
///
/// `created_at` is written once, on first persist. `updated_at` is refreshed
/// on every successful persist, including the first, so the two are equal
/// on a freshly created record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Store-assigned identifier, immutable once assigned.
    pub id: EntityId,
    /// Time of first persist.
    pub created_at: DateTime<Utc>,
    /// Time of the most recent persist.
    pub updated_at: DateTime<Utc>,
    /// Domain fields.
    #[serde(flatten)]
    pub fields: T,
}

impl<T> Record<T> {
    /// Builds the record for a first persist: both timestamps are `now`.
    #[must_use]
    pub fn new(id: EntityId, fields: T, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Builds the next revision of this record with new domain fields.
    ///
    /// Identity and `created_at` are carried over; `updated_at` becomes `now`.
    #[must_use]
    pub fn revise(&self, fields: T, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            updated_at: now,
            fields,
        }
    }
}

impl<T> Identified for Record<T> {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// The identity-only view of an entity owned by another service.
///
/// Peers answer with their full record; every other field is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Identity at the owning service.
    pub id: EntityId,
}

impl Identified for EntityRef {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_revise_keeps_identity_and_creation_time() {
        // Arrange
        let created = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 1, 16, 8, 30, 0).unwrap();
        let record = Record::new(
            7,
            Note {
                text: "first".into(),
            },
            created,
        );

        // Act
        let revised = record.revise(
            Note {
                text: "second".into(),
            },
            later,
        );

        // Assert
        assert_eq!(revised.id, 7);
        assert_eq!(revised.created_at, created);
        assert_eq!(revised.updated_at, later);
        assert_eq!(revised.fields.text, "second");
    }

    #[test]
    fn test_fields_are_flattened_in_json() {
        let created = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let record = Record::new(3, Note { text: "hi".into() }, created);

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["text"], "hi");
        assert_eq!(json["created_at"], json["updated_at"]);
    }

    #[test]
    fn test_entity_ref_ignores_foreign_fields() {
        let json = r#"{"id":9,"firstname":"Ana","tables_id":[1,2],"created_at":"2026-01-15T10:00:00Z"}"#;

        let reference: EntityRef = serde_json::from_str(json).unwrap();

        assert_eq!(reference, EntityRef { id: 9 });
    }
}
