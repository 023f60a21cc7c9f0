//! Endpoints guarded by credentials.

use axum::Json;
use domain::VerifiedUser;
use serde::Serialize;

use crate::extract::{AdminOperator, GcpdUser};

#[derive(Serialize)]
pub struct GcpdFilesResponse {
    pub message: &'static str,
    pub accessed_by: VerifiedUser,
}

/// GET /gcpd-files: requires a valid `X-API-Key`.
pub async fn gcpd_files(GcpdUser(user): GcpdUser) -> Json<GcpdFilesResponse> {
    tracing::info!(user_id = %user.user_id, "secure files accessed");
    Json(GcpdFilesResponse {
        message: "Access granted to secure GCPD files.",
        accessed_by: user,
    })
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /batcave/control-panel: administrators only.
pub async fn control_panel(AdminOperator(operator): AdminOperator) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!(
            "Welcome to the Batcave Control Panel, {}!",
            operator.display_name()
        ),
    })
}
