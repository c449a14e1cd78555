//! Liveness endpoint.

use axum::http::{header, HeaderValue};
use axum::response::IntoResponse;

use crate::http::cache::CachePolicy;

/// Answers without touching the asset store or origin.
pub async fn liveness() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=UTF-8")),
            (header::CACHE_CONTROL, CachePolicy::NoStore.header_value()),
        ],
        "ok",
    )
}
