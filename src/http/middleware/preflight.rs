//! CORS preflight middleware.
//! Answers every `OPTIONS` request before classification runs.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::headers::apply_preflight;

pub async fn preflight_middleware(req: Request<Body>, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }

    tracing::debug!(path = %req.uri().path(), "Answering CORS preflight");
    let mut response = StatusCode::NO_CONTENT.into_response();
    apply_preflight(response.headers_mut());
    response
}
