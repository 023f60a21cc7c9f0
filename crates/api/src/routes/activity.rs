//! Endpoints that hand work to the background worker.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::{Email, IntelReportRequest};
use serde::Deserialize;
use upstream::Directory;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::secure::MessageResponse;
use crate::state::AppState;
use crate::tasks::Job;

fn default_activity() -> String {
    "Generic activity logged.".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    #[serde(default = "default_activity")]
    pub activity_description: String,
}

/// POST /log-activity/{email}
#[tracing::instrument(skip(state, params))]
pub async fn log_activity<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    ApiPath(email): ApiPath<String>,
    ApiQuery(params): ApiQuery<ActivityParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = Email::parse(email)?;
    let message = format!("Activity logging initiated for {email}.");

    state.tasks.enqueue(Job::LogActivity {
        email,
        activity: params.activity_description,
    })?;
    Ok(Json(MessageResponse { message }))
}

/// POST /request-intel-report
#[tracing::instrument(skip(state, request))]
pub async fn request_intel_report<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    ApiJson(request): ApiJson<IntelReportRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = request.validate()?;
    let message = format!(
        "Intel report '{}' compilation requested for {}. Alfred is on it.",
        request.report_name, request.recipient_email
    );

    state.tasks.enqueue(Job::CompileReport(request))?;
    Ok(Json(MessageResponse { message }))
}
