//! Scoped Batcomputer database sessions.
//!
//! A [`DbSession`] is opened by its extractor when a handler asks for one and
//! closed when the handler drops it, whether the handler succeeded or failed.
//! The [`SessionPool`] keeps open/close counts for `/metrics` and tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;
use upstream::Directory;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Hands out sessions and counts how many have been closed.
#[derive(Debug, Default)]
pub struct SessionPool {
    opened: AtomicU64,
    closed: AtomicU64,
}

impl SessionPool {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn open(self: &Arc<Self>) -> DbSession {
        let id = Uuid::new_v4();
        self.opened.fetch_add(1, Ordering::SeqCst);
        metrics::gauge!("db_sessions_active").increment(1.0);
        tracing::info!(session_id = %id, "batcomputer db session opened");

        DbSession {
            id,
            data: BTreeMap::new(),
            pool: Arc::clone(self),
        }
    }

    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> u64 {
        self.closed.load(Ordering::SeqCst)
    }

    /// Sessions opened and not yet dropped.
    pub fn active(&self) -> u64 {
        self.opened().saturating_sub(self.closed())
    }
}

/// Session as reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetails {
    pub id: Uuid,
    pub status: &'static str,
    pub data: BTreeMap<String, String>,
}

/// One open session. Closing happens in `Drop`.
#[derive(Debug)]
pub struct DbSession {
    id: Uuid,
    data: BTreeMap<String, String>,
    pool: Arc<SessionPool>,
}

impl DbSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Writes an entry into the session's scratch data.
    pub fn record(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn details(&self) -> SessionDetails {
        SessionDetails {
            id: self.id,
            status: "connected",
            data: self.data.clone(),
        }
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        self.pool.closed.fetch_add(1, Ordering::SeqCst);
        metrics::gauge!("db_sessions_active").decrement(1.0);
        metrics::counter!("db_sessions_closed_total").increment(1);
        tracing::info!(
            session_id = %self.id,
            entries = self.data.len(),
            "batcomputer db session closed"
        );
    }
}

impl<D: Directory + 'static> FromRequestParts<Arc<AppState<D>>> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState<D>>,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.sessions.open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_session_closes_it() {
        let pool = SessionPool::new();

        let mut session = pool.open();
        session.record("log_entry_1", "Accessed gadget inventory.");
        assert_eq!(pool.active(), 1);

        let details = session.details();
        assert_eq!(details.status, "connected");
        assert_eq!(details.data["log_entry_1"], "Accessed gadget inventory.");

        drop(session);
        assert_eq!(pool.opened(), 1);
        assert_eq!(pool.closed(), 1);
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn session_closes_when_work_fails() {
        fn risky(mut session: DbSession) -> Result<(), String> {
            session.record("log_entry_error", "Attempting risky operation...");
            Err("meltdown".to_string())
        }

        let pool = SessionPool::new();
        assert!(risky(pool.open()).is_err());
        assert_eq!(pool.closed(), 1);
    }

    #[test]
    fn each_session_gets_its_own_id() {
        let pool = SessionPool::new();
        let first = pool.open();
        let second = pool.open();
        assert_ne!(first.id(), second.id());
        assert_eq!(pool.active(), 2);
    }
}
