//! Service-level endpoints: welcome, status, health and metrics.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// GET /
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Batcomputer API Interface. Try /batcave-display for HTML view.",
    })
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// GET /status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Protecting Gotham",
    })
}

/// GET /health
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// GET /metrics: Prometheus text exposition.
pub async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
