use serde::{Deserialize, Serialize};

/// Identifier of a stored record.
///
/// Identifiers are positive integers handed out by a store's counter at
/// creation time. Wrapping the raw `u64` keeps gadget and contact ids from
/// being mixed up with pagination offsets and other plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The first identifier a fresh store assigns.
    pub const FIRST: RecordId = RecordId(1);

    /// Creates an identifier from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}
