//! Batcomputer log endpoints backed by a scoped db session.

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::session::{DbSession, SessionDetails};

#[derive(Serialize)]
pub struct LogAccessResponse {
    pub message: &'static str,
    pub session_details: SessionDetails,
}

/// GET /batcomputer-logs
#[tracing::instrument(skip(session), fields(session_id = %session.id()))]
pub async fn read_logs(mut session: DbSession) -> Json<LogAccessResponse> {
    session.record("log_entry_1", "Accessed gadget inventory.");
    Json(LogAccessResponse {
        message: "Log data accessed using DB session",
        session_details: session.details(),
    })
}

/// GET /batcomputer-logs-error: fails mid-session. The session still closes.
#[tracing::instrument(skip(session), fields(session_id = %session.id()))]
pub async fn read_logs_failing(mut session: DbSession) -> Result<Json<LogAccessResponse>, ApiError> {
    session.record("log_entry_error", "Attempting risky operation...");
    Err(ApiError::Internal(
        "Batcomputer core meltdown simulated!".to_string(),
    ))
}
