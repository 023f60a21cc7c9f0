use thiserror::Error;

use crate::RecordId;

/// Errors that can occur when interacting with a record store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record is stored under the identifier.
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: RecordId },

    /// Another record already uses the name (compared case-insensitively).
    #[error("{kind} named '{name}' already exists")]
    Conflict {
        kind: &'static str,
        name: String,
        existing: RecordId,
    },
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
