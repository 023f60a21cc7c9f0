//! Value objects shared by the domain records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How far a contact can be trusted, from 1 (barely) to 5 (fully).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct TrustLevel(u8);

impl TrustLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a trust level, rejecting values outside 1..=5.
    pub fn new(level: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(ValidationError::TrustLevelOutOfRange(level))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for TrustLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for TrustLevel {
    type Error = ValidationError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<TrustLevel> for u8 {
    fn from(level: TrustLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A syntactically plausible email address.
///
/// Accepts `local@domain.tld` with no whitespace, exactly one `@`, and a
/// domain containing a dot that is neither its first nor last character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        let valid = match trimmed.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !trimmed.chars().any(char::is_whitespace)
            }
            None => false,
        };

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidEmail(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
