//! Response construction.
//!
//! # Responsibilities
//! - Build asset, shell and fallback responses with their header sets
//! - Build the small fixed error bodies (plain text 404, JSON 404/502, 405)
//!
//! # Design Decisions
//! - Every builder returns a complete `Response`; nothing here can fail
//! - Header values come from static tables or values validated at startup

use axum::body::{Body, Bytes};
use axum::http::header::{self, HeaderValue};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::http::cache::CachePolicy;
use crate::security::headers::{apply_allow_origin, SecurityHeaders};

/// Which tier produced an asset; see `AssetLookup::source`.
pub const X_EDGE_SOURCE: HeaderName = HeaderName::from_static("x-edge-source");

/// Content-Type of the shell and the fallback page.
pub const HTML_UTF8: &str = "text/html; charset=UTF-8";

/// Page served when the SPA shell cannot be retrieved or handling failed.
pub const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Temporarily unavailable</title>
<style>
body{font-family:system-ui,sans-serif;display:flex;align-items:center;justify-content:center;min-height:100vh;margin:0;background:#f7f7f8;color:#222}
main{max-width:28rem;text-align:center;padding:2rem}
</style>
</head>
<body>
<main>
<h1>We'll be right back</h1>
<p>The site is loading slowly right now. This page will retry automatically.</p>
<p><a href="/">Reload now</a></p>
</main>
<script>
setTimeout(function () { window.location.reload(); }, 5000);
</script>
</body>
</html>
"#;

/// A static asset with its content type, cache policy and source tier.
pub fn asset_response(
    body: Bytes,
    content_type: &str,
    policy: CachePolicy,
    source: &'static str,
) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(crate::http::mime::OCTET_STREAM)),
    );
    headers.insert(header::CACHE_CONTROL, policy.header_value());
    headers.insert(X_EDGE_SOURCE, HeaderValue::from_static(source));
    apply_allow_origin(headers);
    response
}

/// The SPA shell: always 200, never cached, with security headers.
pub fn shell_response(body: Bytes, security: &SecurityHeaders, source: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(HTML_UTF8));
    headers.insert(header::CACHE_CONTROL, CachePolicy::Revalidate.header_value());
    headers.insert(X_EDGE_SOURCE, HeaderValue::from_static(source));
    security.apply(headers);
    response
}

/// Built-in recovery page: 200, `no-store`, auto-reloads.
pub fn fallback_page() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(HTML_UTF8)),
            (header::CACHE_CONTROL, CachePolicy::NoStore.header_value()),
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        FALLBACK_PAGE,
    )
        .into_response()
}

/// Plain-text 404 for static assets nobody has.
pub fn asset_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        "Not Found",
    )
        .into_response()
}

/// JSON error body used by API routes.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    let mut response = (status, axum::Json(json!({ "error": message }))).into_response();
    apply_allow_origin(response.headers_mut());
    response
}

/// 405 for non-GET/HEAD requests on assets and client routes.
pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [
            (header::ALLOW, "GET, HEAD, OPTIONS"),
            (header::CONTENT_TYPE, "text/plain; charset=UTF-8"),
        ],
        "Method Not Allowed",
    )
        .into_response()
}
