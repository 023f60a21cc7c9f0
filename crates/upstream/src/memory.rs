//! Scriptable in-memory directory for tests.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::directory::{Directory, PostFilter};
use crate::error::{Result, UpstreamError};

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: BTreeMap<u64, Value>,
    posts: Vec<Value>,
    unavailable: bool,
    failure_status: Option<(u16, String)>,
}

/// In-memory directory for testing.
///
/// Can be told to behave as if the network were down, or as if the upstream
/// answered every request with a given error status.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user_id: u64, user: Value) -> Self {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .users
            .insert(user_id, user);
        self
    }

    pub fn with_post(self, post: Value) -> Self {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .posts
            .push(post);
        self
    }

    /// Makes every call fail as if the service were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .unavailable = unavailable;
    }

    /// Makes every call fail with the given upstream status and body.
    pub fn set_failure_status(&self, failure: Option<(u16, &str)>) {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .failure_status = failure.map(|(status, body)| (status, body.to_string()));
    }

    fn check_failures(state: &InMemoryDirectoryState) -> Result<()> {
        if state.unavailable {
            return Err(UpstreamError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        if let Some((status, body)) = &state.failure_status {
            return Err(UpstreamError::Status {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn fetch_user(&self, user_id: u64) -> Result<Value> {
        let state = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::check_failures(&state)?;

        state
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound {
                resource: format!("user {user_id}"),
            })
    }

    async fn fetch_posts(&self, filter: PostFilter) -> Result<Vec<Value>> {
        let state = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self::check_failures(&state)?;

        Ok(state
            .posts
            .iter()
            .filter(|post| match filter.user_id {
                Some(user_id) => post["userId"].as_u64() == Some(user_id),
                None => true,
            })
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }
}
