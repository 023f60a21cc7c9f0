use async_trait::async_trait;

use crate::{Record, RecordId, RecordQuery, Result, Stored};

/// Core trait for record store implementations.
///
/// A store maps identifiers to records of one kind and enforces that no two
/// records share a name under case-insensitive comparison. All
/// implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Returns the record stored under `id`.
    ///
    /// Fails with `NotFound` if the identifier is absent. Never mutates.
    async fn get(&self, id: RecordId) -> Result<Stored<R>>;

    /// Inserts a new record under a freshly assigned identifier.
    ///
    /// The duplicate-name check and the insert happen atomically: fails with
    /// `Conflict` and leaves the store untouched if the name is taken.
    async fn create(&self, record: R) -> Result<Stored<R>>;

    /// Returns records in identifier order, windowed by `query`.
    async fn list(&self, query: RecordQuery) -> Result<Vec<Stored<R>>>;

    /// Looks up a record by name, ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Option<Stored<R>>>;

    /// Returns the number of stored records.
    async fn count(&self) -> Result<usize>;

    /// Removes every record and returns how many were removed.
    ///
    /// Identifiers handed out before the clear are never reused.
    async fn clear(&self) -> Result<usize>;
}
