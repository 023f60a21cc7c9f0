//! HTTP directory integration tests.
//!
//! Starts a stub axum server standing in for the placeholder service and
//! exercises the real reqwest-backed client against it.

use std::collections::HashMap;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use futures_util::stream;
use serde_json::{Value, json};
use upstream::{Directory, HttpDirectory, HttpDirectoryConfig, PostFilter, UpstreamError};

async fn user(Path(id): Path<u64>) -> impl IntoResponse {
    match id {
        1 => (StatusCode::OK, Json(json!({"id": 1, "name": "Leanne Graham"}))).into_response(),
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        503 => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        42 => (StatusCode::OK, "not json at all").into_response(),
        7 => (StatusCode::OK, stalled_body()).into_response(),
        502 => (StatusCode::BAD_GATEWAY, stalled_body()).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

/// Body whose only chunk arrives long after the headers.
fn stalled_body() -> Body {
    Body::from_stream(stream::once(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok::<_, std::io::Error>(String::from("{}"))
    }))
}

async fn posts(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    // Echo the query back so tests can check what the client sent.
    let limit: usize = params
        .get("_limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(100);
    let posts: Vec<Value> = (1..=limit)
        .map(|i| {
            json!({
                "id": i,
                "userId": params.get("userId").cloned(),
                "title": format!("post {i}"),
            })
        })
        .collect();
    Json(Value::Array(posts))
}

/// Bind to port 0 and return the stub's base URL.
async fn start_stub() -> String {
    let app = Router::new()
        .route("/users/{id}", get(user))
        .route("/posts", get(posts));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> HttpDirectory {
    client_with_timeout(base_url, Duration::from_secs(5))
}

fn client_with_timeout(base_url: String, timeout: Duration) -> HttpDirectory {
    HttpDirectory::new(HttpDirectoryConfig { base_url, timeout }).unwrap()
}

#[tokio::test]
async fn fetch_existing_user_returns_payload_unchanged() {
    let directory = client(start_stub().await);

    let user = directory.fetch_user(1).await.unwrap();
    assert_eq!(user, json!({"id": 1, "name": "Leanne Graham"}));
}

#[tokio::test]
async fn upstream_404_maps_to_not_found() {
    let directory = client(start_stub().await);

    let err = directory.fetch_user(999).await.unwrap_err();
    assert!(matches!(err, UpstreamError::NotFound { ref resource } if resource == "user 999"));
}

#[tokio::test]
async fn upstream_error_status_carries_status_and_body() {
    let directory = client(start_stub().await);

    let err = directory.fetch_user(500).await.unwrap_err();
    assert!(matches!(
        err,
        UpstreamError::Status { status: 500, ref body } if body == "upstream exploded"
    ));

    let err = directory.fetch_user(503).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status: 503, .. }));
}

#[tokio::test]
async fn non_json_success_is_invalid_payload() {
    let directory = client(start_stub().await);

    let err = directory.fetch_user(42).await.unwrap_err();
    assert!(matches!(err, UpstreamError::InvalidPayload(_)));
}

#[tokio::test]
async fn timeout_while_reading_body_is_unavailable() {
    let directory = client_with_timeout(start_stub().await, Duration::from_millis(300));

    let err = directory.fetch_user(7).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unavailable(_)), "{err:?}");

    // Same when the stalled body belongs to an error status.
    let err = directory.fetch_user(502).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unavailable(_)), "{err:?}");
}

#[tokio::test]
async fn posts_query_uses_upstream_parameter_names() {
    let directory = client(start_stub().await);

    let posts = directory
        .fetch_posts(PostFilter::new(3).user(7))
        .await
        .unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0]["userId"], "7");

    let posts = directory.fetch_posts(PostFilter::new(2)).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts[0]["userId"].is_null());
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let directory = client(format!("http://{addr}"));

    let err = directory.fetch_user(1).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unavailable(_)));
}
