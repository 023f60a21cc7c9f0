//! Request extractors.
//!
//! The `Api*` wrappers swap axum's plain-text rejections for [`ApiError`]
//! so every failure carries a `{"detail": ...}` body. The credential
//! extractors enforce the access rules before a handler runs.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Query};
use axum::http::request::Parts;
use common::RecordId;
use domain::{AccessError, Operator, VerifiedUser};
use record_store::RecordQuery;
use serde::Deserialize;
use upstream::Directory;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Integer identifier taken from a `{id}` path segment.
///
/// Any integer is accepted. Integers that no record can carry (negative,
/// or past `u64::MAX`) are kept as written so the lookup reports them
/// missing instead of rejecting the request. Only non-integer text is a 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Id(RecordId),
    Unassigned(String),
}

impl RecordKey {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::BadRequest(format!(
                "Invalid ID '{raw}': expected an integer."
            )));
        }

        Ok(match raw.parse::<u64>() {
            Ok(id) => RecordKey::Id(RecordId::new(id)),
            Err(_) => RecordKey::Unassigned(raw.to_string()),
        })
    }

    /// The record id, or the raw text for building a not-found error.
    pub fn into_id(self) -> Result<RecordId, String> {
        match self {
            RecordKey::Id(id) => Ok(id),
            RecordKey::Unassigned(raw) => Err(raw),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RecordKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ApiPath(raw) = ApiPath::<String>::from_request_parts(parts, state).await?;
        RecordKey::parse(&raw)
    }
}

fn default_limit() -> usize {
    RecordQuery::DEFAULT_LIMIT
}

/// `?skip=&limit=` window shared by listing endpoints.
#[derive(Debug, Clone, Copy, Deserialize, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl From<Pagination> for RecordQuery {
    fn from(page: Pagination) -> Self {
        RecordQuery::new().skip(page.skip).limit(page.limit)
    }
}

/// Raw value of the `X-API-Key` header. Absent or empty is a 401.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|key| !key.is_empty())
            .map(|key| ApiKey(key.to_string()))
            .ok_or_else(|| AccessError::MissingApiKey.into())
    }
}

/// Caller whose API key matched the configured one.
#[derive(Debug, Clone)]
pub struct GcpdUser(pub VerifiedUser);

impl<D: Directory + 'static> FromRequestParts<Arc<AppState<D>>> for GcpdUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<D>>,
    ) -> Result<Self, Self::Rejection> {
        let ApiKey(key) = ApiKey::from_request_parts(parts, state).await?;
        let user = state.api_keys.verify(Some(&key)).inspect_err(|err| {
            tracing::warn!(error = %err, "api key rejected");
        })?;
        Ok(GcpdUser(user))
    }
}

/// The active operator profile.
#[derive(Debug, Clone)]
pub struct CurrentOperator(pub Operator);

impl<D: Directory + 'static> FromRequestParts<Arc<AppState<D>>> for CurrentOperator {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState<D>>,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentOperator(state.operator.clone().ensure_active()?))
    }
}

/// The active operator, who must also be an administrator.
#[derive(Debug, Clone)]
pub struct AdminOperator(pub Operator);

impl<D: Directory + 'static> FromRequestParts<Arc<AppState<D>>> for AdminOperator {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<D>>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentOperator(operator) = CurrentOperator::from_request_parts(parts, state).await?;
        Ok(AdminOperator(operator.ensure_admin()?))
    }
}
