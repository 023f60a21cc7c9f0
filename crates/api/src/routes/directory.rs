//! Pass-through endpoints backed by the upstream directory.
//!
//! Upstream payloads are returned untouched inside a small envelope. Failures
//! are translated by [`ApiError::from_upstream`]: unreachable is 503, a
//! missing resource is 404 and any other error status is 502.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use upstream::{Directory, PostFilter};

use crate::error::ApiError;
use crate::extract::{ApiQuery, RecordKey};
use crate::state::AppState;

const CONTACT_SOURCE: &str = "External contact database";
const INTEL_SOURCE: &str = "External intel feed";

fn missing_contact(id: &dyn std::fmt::Display) -> String {
    format!("Contact with ID {id} not found in external source.")
}

#[derive(Serialize)]
pub struct FetchedContactResponse {
    pub message: String,
    pub source: &'static str,
    pub contact_data: Value,
}

/// GET /fetch-contacts/{id}
#[tracing::instrument(skip(state))]
pub async fn fetch_contact<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    key: RecordKey,
) -> Result<Json<FetchedContactResponse>, ApiError> {
    // The directory only knows positive ids; anything else cannot exist there.
    let id = key.into_id().map_err(|raw| ApiError::NotFound(missing_contact(&raw)))?;
    let contact_data = state.directory.fetch_user(id.as_u64()).await.map_err(|err| {
        tracing::warn!(error = %err, "contact lookup failed upstream");
        ApiError::from_upstream(err, CONTACT_SOURCE, || missing_contact(&id))
    })?;

    Ok(Json(FetchedContactResponse {
        message: format!("Successfully fetched contact {id}"),
        source: "JSONPlaceholder API (Simulated Contact DB)",
        contact_data,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PostsParams {
    #[serde(default = "default_post_limit")]
    pub limit: u32,
    pub user_id: Option<u64>,
}

fn default_post_limit() -> u32 {
    PostFilter::DEFAULT_LIMIT
}

impl From<PostsParams> for PostFilter {
    fn from(params: PostsParams) -> Self {
        let filter = PostFilter::new(params.limit);
        match params.user_id {
            Some(user_id) => filter.user(user_id),
            None => filter,
        }
    }
}

#[derive(Serialize)]
pub struct FetchedPostsResponse {
    pub message: String,
    pub source: &'static str,
    pub filter_params_sent: PostFilter,
    pub reports: Vec<Value>,
}

/// GET /fetch-posts?limit=&user_id=
#[tracing::instrument(skip(state))]
pub async fn fetch_posts<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    ApiQuery(params): ApiQuery<PostsParams>,
) -> Result<Json<FetchedPostsResponse>, ApiError> {
    let filter = PostFilter::from(params);
    let reports = state
        .directory
        .fetch_posts(filter)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "intel feed request failed upstream");
            ApiError::from_upstream(err, INTEL_SOURCE, || {
                "Intel reports not found in external source.".to_string()
            })
        })?;

    Ok(Json(FetchedPostsResponse {
        message: format!(
            "Successfully fetched {} intel reports (posts) from external source",
            reports.len()
        ),
        source: "JSONPlaceholder API (Simulated Intel Feed)",
        filter_params_sent: filter,
        reports,
    }))
}
