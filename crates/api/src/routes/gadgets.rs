//! Gadget inventory endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::RecordId;
use domain::{DomainError, Gadget, GadgetSpec};
use record_store::Stored;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use upstream::Directory;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, RecordKey};
use crate::state::AppState;

#[derive(Serialize)]
pub struct GadgetDetailsResponse {
    pub gadget_id: RecordId,
    pub status: &'static str,
    pub details: Gadget,
}

/// GET /gadgets/{id}
#[tracing::instrument(skip(state))]
pub async fn get<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    key: RecordKey,
) -> Result<Json<GadgetDetailsResponse>, ApiError> {
    let id = key.into_id().map_err(DomainError::GadgetNotFound)?;
    let stored = state.inventory.get(id).await?;
    Ok(Json(GadgetDetailsResponse {
        gadget_id: stored.id,
        status: "Located in inventory",
        details: stored.record,
    }))
}

/// POST /gadgets
#[tracing::instrument(skip(state, spec))]
pub async fn create<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    ApiJson(spec): ApiJson<GadgetSpec>,
) -> Result<(StatusCode, Json<Stored<Gadget>>), ApiError> {
    let stored = state.inventory.create(spec).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[derive(Debug, Deserialize)]
pub struct UtilityFilter {
    #[serde(default)]
    pub min_utility: i64,
    pub max_utility: Option<i64>,
}

/// GET /filter-gadgets: echoes the utility window it was given.
pub async fn filter(
    ApiQuery(filter): ApiQuery<UtilityFilter>,
) -> Result<Json<Value>, ApiError> {
    let max_utility = match filter.max_utility {
        Some(max) if max < filter.min_utility => {
            return Err(ApiError::BadRequest(format!(
                "min_utility ({}) cannot be greater than max_utility ({max}).",
                filter.min_utility
            )));
        }
        Some(max) => json!(max),
        None => json!("No upper limit"),
    };

    Ok(Json(json!({
        "filtering_gadgets_by": {
            "min_utility": filter.min_utility,
            "max_utility": max_utility,
        }
    })))
}
