//! Contact registry endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{Contact, DomainError, NewContact, Operator};
use record_store::Stored;
use serde::Serialize;
use upstream::Directory;

use crate::error::ApiError;
use crate::extract::{ApiJson, CurrentOperator, Pagination, RecordKey};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ContactListResponse {
    pub skip: usize,
    pub limit: usize,
    pub contacts: Vec<Stored<Contact>>,
}

/// POST /contacts
#[tracing::instrument(skip(state, contact))]
pub async fn create<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    ApiJson(contact): ApiJson<NewContact>,
) -> Result<(StatusCode, Json<Stored<Contact>>), ApiError> {
    let stored = state.contacts.register(contact).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /contacts/{id}
#[tracing::instrument(skip(state))]
pub async fn get<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    key: RecordKey,
) -> Result<Json<Stored<Contact>>, ApiError> {
    let id = key.into_id().map_err(DomainError::ContactNotFound)?;
    Ok(Json(state.contacts.get(id).await?))
}

/// GET /contacts?skip=&limit=
#[tracing::instrument(skip(state))]
pub async fn list<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
    page: Pagination,
) -> Result<Json<ContactListResponse>, ApiError> {
    let contacts = state.contacts.list(page.into()).await?;
    Ok(Json(ContactListResponse {
        skip: page.skip,
        limit: page.limit,
        contacts,
    }))
}

/// DELETE /contacts
#[tracing::instrument(skip(state))]
pub async fn clear<D: Directory + 'static>(
    State(state): State<Arc<AppState<D>>>,
) -> Result<StatusCode, ApiError> {
    state.contacts.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /contacts/me
pub async fn me(CurrentOperator(operator): CurrentOperator) -> Json<Operator> {
    Json(operator)
}
