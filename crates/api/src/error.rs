//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{AccessError, DomainError};
use upstream::UpstreamError;

use crate::tasks::TaskError;

/// API-level error type that maps to HTTP responses.
///
/// Every variant carries the message sent back as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// Resource absent locally or reported absent upstream.
    NotFound(String),
    /// Name already taken. Reported as 400, not 409.
    Conflict(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Well-formed request whose content failed validation.
    Validation(String),
    /// Required credential missing.
    Unauthenticated(String),
    /// Credential present but not good enough.
    Unauthorized(String),
    /// Upstream could not be reached.
    UpstreamUnavailable(String),
    /// Upstream answered with an error status.
    BadGateway(String),
    /// Extractor rejection, keeping the status axum chose.
    Rejected(StatusCode, String),
    /// Internal server error.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Rejected(status, _) => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translates an upstream failure for an endpoint backed by `source`.
    ///
    /// `not_found` builds the message used when the upstream reports the
    /// resource absent.
    pub fn from_upstream(
        err: UpstreamError,
        source: &str,
        not_found: impl FnOnce() -> String,
    ) -> Self {
        match err {
            UpstreamError::NotFound { .. } => ApiError::NotFound(not_found()),
            UpstreamError::Unavailable(reason) => {
                ApiError::UpstreamUnavailable(format!("{source} request failed: {reason}"))
            }
            UpstreamError::Status { status, body } => {
                ApiError::BadGateway(format!("{source} returned status {status}: {body}"))
            }
            UpstreamError::InvalidPayload(reason) => {
                ApiError::BadGateway(format!("{source} returned an unreadable payload: {reason}"))
            }
            UpstreamError::ClientSetup(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                msg
            }
            ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::Unauthenticated(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::UpstreamUnavailable(msg)
            | ApiError::BadGateway(msg)
            | ApiError::Rejected(_, msg) => msg,
        };

        let body = serde_json::json!({ "detail": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::GadgetNotFound(_) | DomainError::ContactNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::DuplicateGadget(_) | DomainError::DuplicateContact(_) => {
                ApiError::Conflict(err.to_string())
            }
            DomainError::Validation(_) => ApiError::Validation(err.to_string()),
            DomainError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::MissingApiKey => ApiError::Unauthenticated(err.to_string()),
            AccessError::InvalidApiKey | AccessError::AdminRequired => {
                ApiError::Unauthorized(err.to_string())
            }
            AccessError::InactiveUser => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<domain::ValidationError> for ApiError {
    fn from(err: domain::ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}
