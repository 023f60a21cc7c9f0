//! Access rules: API key verification and the operator profile.

use serde::Serialize;
use thiserror::Error;

/// Why a caller was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No `X-API-Key` header was sent.
    #[error("X-API-Key header missing (Authentication required)")]
    MissingApiKey,

    /// A key was sent but does not match.
    #[error("Invalid API Key provided (Access Denied)")]
    InvalidApiKey,

    /// The operator account is deactivated.
    #[error("User account is inactive.")]
    InactiveUser,

    /// The operator is not an administrator.
    #[error("Admin privileges required. Access denied.")]
    AdminRequired,
}

/// The identity behind a verified API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedUser {
    pub user_id: String,
    pub permissions: Vec<String>,
}

/// Checks presented API keys against the configured one.
#[derive(Debug, Clone)]
pub struct ApiKeyVerifier {
    expected: String,
}

impl ApiKeyVerifier {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Verifies a key taken from a request header.
    ///
    /// A missing or empty key is `MissingApiKey`; a wrong key is
    /// `InvalidApiKey`.
    pub fn verify(&self, presented: Option<&str>) -> Result<VerifiedUser, AccessError> {
        let key = match presented {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AccessError::MissingApiKey),
        };
        if key != self.expected {
            return Err(AccessError::InvalidApiKey);
        }
        Ok(VerifiedUser {
            user_id: "gcpd_officer_jim".to_string(),
            permissions: vec!["read_cases".to_string()],
        })
    }
}

/// The operator the API acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

impl Operator {
    const ADMIN: &'static str = "batman";

    /// The default operator profile.
    pub fn batman() -> Self {
        Self {
            username: Self::ADMIN.to_string(),
            email: "bruce@wayne.enterprises".to_string(),
            is_active: true,
        }
    }

    pub fn ensure_active(self) -> Result<Self, AccessError> {
        if self.is_active {
            Ok(self)
        } else {
            Err(AccessError::InactiveUser)
        }
    }

    pub fn ensure_admin(self) -> Result<Self, AccessError> {
        if self.username == Self::ADMIN {
            Ok(self)
        } else {
            Err(AccessError::AdminRequired)
        }
    }

    /// Username with its first letter capitalised, for greetings.
    pub fn display_name(&self) -> String {
        let mut chars = self.username.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
