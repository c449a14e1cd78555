//! API passthrough.
//!
//! # Responsibilities
//! - Forward `/api/*` requests to the configured upstream, unchanged apart from
//!   hop-by-hop headers and the target authority
//! - Answer 404 JSON when no upstream is configured
//!
//! # Design Decisions
//! - Single attempt; failures become 502 JSON, never the SPA shell
//! - Request bodies are buffered up to the configured limit
//! - Upstream responses are streamed back as-is

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Uri};
use axum::response::Response;

use crate::error::EdgeError;
use crate::http::client::HttpClient;
use crate::security::headers::strip_hop_by_hop;

/// Forwards API requests, or reports them as unknown.
#[derive(Clone)]
pub struct ApiPassthrough {
    upstream: Option<Arc<str>>,
    client: HttpClient,
    timeout: Duration,
    max_body_size: usize,
}

impl ApiPassthrough {
    pub fn new(
        upstream: Option<&str>,
        client: HttpClient,
        timeout: Duration,
        max_body_size: usize,
    ) -> Self {
        Self {
            upstream: upstream.map(|u| Arc::from(u.trim_end_matches('/'))),
            client,
            timeout,
            max_body_size,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.upstream.is_some()
    }

    pub async fn forward(&self, request: Request<Body>) -> Result<Response, EdgeError> {
        let Some(upstream) = &self.upstream else {
            return Err(EdgeError::ApiNotFound {
                path: request.uri().path().to_string(),
            });
        };

        let (mut parts, body) = request.into_parts();
        let target = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let uri: Uri = format!("{upstream}{target}")
            .parse()
            .map_err(|e| EdgeError::Internal(format!("invalid upstream uri: {e}")))?;

        let bytes = axum::body::to_bytes(body, self.max_body_size)
            .await
            .map_err(|e| EdgeError::InvalidBody(e.to_string()))?;

        strip_hop_by_hop(&mut parts.headers);
        parts.headers.remove(header::HOST);

        let mut builder = Request::builder().method(parts.method).uri(uri.clone());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(parts.headers);
        }
        let forwarded = builder
            .body(Body::from(bytes))
            .map_err(|e| EdgeError::Internal(e.to_string()))?;

        tracing::debug!(uri = %uri, "Forwarding API request");
        match tokio::time::timeout(self.timeout, self.client.request(forwarded)).await {
            Ok(Ok(response)) => {
                let (mut parts, body) = response.into_parts();
                strip_hop_by_hop(&mut parts.headers);
                Ok(Response::from_parts(parts, Body::new(body)))
            }
            Ok(Err(e)) => Err(EdgeError::Upstream(e.to_string())),
            Err(_) => Err(EdgeError::Upstream(format!(
                "timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}
