//! The directory trait and its request types.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Filter for the posts listing.
///
/// Serializes to the query string the placeholder service expects
/// (`_limit`, `userId`), which is also echoed back to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostFilter {
    #[serde(rename = "_limit")]
    pub limit: u32,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl PostFilter {
    pub const DEFAULT_LIMIT: u32 = 5;

    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            user_id: None,
        }
    }

    pub fn user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

impl Default for PostFilter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

/// Trait for reading from the third-party directory.
///
/// Payloads are returned exactly as the upstream sent them.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Fetches one user record by its upstream id.
    async fn fetch_user(&self, user_id: u64) -> Result<Value>;

    /// Fetches posts matching `filter`.
    async fn fetch_posts(&self, filter: PostFilter) -> Result<Vec<Value>>;
}
