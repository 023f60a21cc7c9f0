//! HTTP implementation of the directory.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::directory::{Directory, PostFilter};
use crate::error::{Result, UpstreamError};

/// The public placeholder service used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Connection settings for [`HttpDirectory`].
#[derive(Debug, Clone)]
pub struct HttpDirectoryConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Directory client backed by `reqwest`.
///
/// One client (and its connection pool) is shared by every request.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(config: HttpDirectoryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("batcomputer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::ClientSetup)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>, resource: String) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        metrics::counter!("upstream_requests_total").increment(1);

        let mut request = self.client.get(&url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|err| {
            metrics::counter!("upstream_failures_total", "reason" => "unavailable").increment(1);
            tracing::warn!(%url, error = %err, "upstream unreachable");
            UpstreamError::Unavailable(err.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            metrics::counter!("upstream_failures_total", "reason" => "not_found").increment(1);
            return Err(UpstreamError::NotFound { resource });
        }
        if !status.is_success() {
            metrics::counter!("upstream_failures_total", "reason" => "status").increment(1);
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) if err.is_timeout() => return Err(read_failure(&url, err)),
                Err(err) => {
                    tracing::warn!(%url, error = %err, "could not read upstream error body");
                    format!("<unreadable body: {err}>")
                }
            };
            tracing::warn!(%url, status = status.as_u16(), "upstream returned error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|err| read_failure(&url, err))
    }
}

/// Classifies a failure while reading a response body.
///
/// Only a body that arrived but did not decode is a bad payload. Timeouts
/// and broken connections mean the upstream stopped answering.
fn read_failure(url: &str, err: reqwest::Error) -> UpstreamError {
    if err.is_decode() {
        metrics::counter!("upstream_failures_total", "reason" => "payload").increment(1);
        UpstreamError::InvalidPayload(err.to_string())
    } else {
        metrics::counter!("upstream_failures_total", "reason" => "unavailable").increment(1);
        tracing::warn!(%url, error = %err, "upstream stopped mid-response");
        UpstreamError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    #[tracing::instrument(skip(self))]
    async fn fetch_user(&self, user_id: u64) -> Result<Value> {
        self.get_json::<Value, ()>(&format!("/users/{user_id}"), None, format!("user {user_id}"))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_posts(&self, filter: PostFilter) -> Result<Vec<Value>> {
        self.get_json("/posts", Some(&filter), "posts".to_string())
            .await
    }
}
