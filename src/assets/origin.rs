//! Origin pass-through fetches.
//!
//! # Responsibilities
//! - Issue a GET for the same path against the configured origin
//! - Map 404/410 to a miss and other non-2xx statuses to an error
//! - Bound every fetch by the origin timeout
//!
//! # Design Decisions
//! - One attempt per request, no retries or backoff
//! - Bodies are buffered; static files are small and need a Content-Length
//! - Timeouts are distinct from transport errors for logging

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, StatusCode, Uri};
use thiserror::Error;

use crate::assets::Asset;
use crate::http::client::HttpClient;

/// Upper bound on buffered origin bodies.
const MAX_ORIGIN_BODY: usize = 64 * 1024 * 1024;

/// Error raised by an origin fetch.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin url '{0}'")]
    InvalidUrl(String),
    #[error("origin request failed: {0}")]
    Transport(String),
    #[error("origin answered {0}")]
    Status(StatusCode),
    #[error("origin timed out after {0:?}")]
    Timeout(Duration),
}

/// Pass-through fetch capability used when the asset store misses.
#[async_trait]
pub trait Origin: Send + Sync {
    /// Fetch `target` (path plus optional query). `Ok(None)` means the origin has no such file.
    async fn fetch(&self, target: &str) -> Result<Option<Asset>, OriginError>;
}

/// Origin reached over plain HTTP with the shared hyper client.
#[derive(Clone)]
pub struct HttpOrigin {
    client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl HttpOrigin {
    pub fn new(client: HttpClient, base_url: &str, timeout: Duration) -> Result<Self, OriginError> {
        let uri: Uri = base_url
            .parse()
            .map_err(|_| OriginError::InvalidUrl(base_url.to_string()))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(OriginError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn target_uri(&self, target: &str) -> Result<Uri, OriginError> {
        let url = format!("{}{}", self.base_url, target);
        url.parse().map_err(|_| OriginError::InvalidUrl(url))
    }

    async fn fetch_inner(&self, uri: Uri) -> Result<Option<Asset>, OriginError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .map_err(|e| OriginError::Transport(e.to_string()))?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| OriginError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(OriginError::Status(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: Bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_ORIGIN_BODY)
            .await
            .map_err(|e| OriginError::Transport(e.to_string()))?;

        Ok(Some(Asset { body, content_type }))
    }
}

#[async_trait]
impl Origin for HttpOrigin {
    async fn fetch(&self, target: &str) -> Result<Option<Asset>, OriginError> {
        let uri = self.target_uri(target)?;
        tracing::debug!(uri = %uri, "Fetching from origin");
        match tokio::time::timeout(self.timeout, self.fetch_inner(uri)).await {
            Ok(result) => result,
            Err(_) => Err(OriginError::Timeout(self.timeout)),
        }
    }
}
