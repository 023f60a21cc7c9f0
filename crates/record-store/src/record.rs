use serde::{Deserialize, Serialize};

use crate::RecordId;

/// A value that can be kept in a [`RecordStore`](crate::RecordStore).
///
/// Every record carries a display name; a store never holds two records
/// whose names are equal ignoring case.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable kind used in error messages (e.g. `"Contact"`).
    const KIND: &'static str;

    /// The record's name.
    fn name(&self) -> &str;

    /// Returns true if `other` collides with this record's name.
    fn same_name(&self, other: &str) -> bool {
        names_collide(self.name(), other)
    }
}

/// Case-insensitive name comparison used for the uniqueness invariant.
pub fn names_collide(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// A record together with the identifier the store assigned to it.
///
/// Serializes flat, with `id` next to the record's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<R> {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: R,
}

impl<R> Stored<R> {
    pub fn new(id: RecordId, record: R) -> Self {
        Self { id, record }
    }
}
