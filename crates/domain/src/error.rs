//! Domain error types.

use record_store::StoreError;
use thiserror::Error;

/// A candidate record or request failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Trust level outside 1..=5.
    #[error("Invalid trust level: {0} (must be between 1 and 5)")]
    TrustLevelOutOfRange(i64),

    /// Malformed email address.
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Carries the identifier as the caller wrote it, which may not be a
    /// valid record id (`-1`, out of range).
    #[error("Gadget with ID {0} not found in inventory.")]
    GadgetNotFound(String),

    #[error("Gadget specification for '{0}' already exists.")]
    DuplicateGadget(String),

    #[error("Contact with ID {0} not found.")]
    ContactNotFound(String),

    #[error("Contact named '{0}' already exists.")]
    DuplicateContact(String),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error from the record store that has no domain meaning.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for domain results.
pub type Result<T> = std::result::Result<T, DomainError>;
