//! Response header middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

pub const PROCESS_TIME_HEADER: &str = "x-process-time";
pub const API_VERSION_HEADER: &str = "x-api-version";

/// Adds `X-Process-Time`, the handling time in seconds to four decimals.
pub async fn process_time(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = format!("{:.4}", start.elapsed().as_secs_f64());

    tracing::debug!(%path, elapsed_secs = %elapsed, "request processed");
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    response
}

/// Adds `X-API-Version` with the crate version.
pub async fn api_version(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        API_VERSION_HEADER,
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    );
    response
}
