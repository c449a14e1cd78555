//! Request handlers.
//!
//! # Data Flow
//! ```text
//! Request (OPTIONS already answered by the preflight layer)
//!     → classify path
//!     → StaticAsset → static_asset.rs
//!     → ApiRoute    → api.rs
//!     → SpaFallback → shell.rs
//!     → EdgeError renders any failure
//! ```
//!
//! The whole dispatch is bounded by `timeouts.request_secs`. An API request
//! that runs out of time answers 502; anything else gets the fallback page.

pub mod api;
pub mod health;
pub mod shell;
pub mod static_asset;

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
};

use crate::error::EdgeError;
use crate::http::request::request_id;
use crate::http::server::EdgeState;
use crate::observability::metrics;
use crate::routing::RouteClass;

pub use api::ApiPassthrough;

/// Fallback handler: every request not claimed by an explicit route lands here.
pub async fn edge_handler(State(state): State<EdgeState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let class = state.classifier.classify(&path);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        class = %class,
        "Routing request"
    );

    let limit = state.request_timeout;
    let work = dispatch(&state, class, request);
    let result = match tokio::time::timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => Err(timed_out(class, limit)),
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            match &e {
                EdgeError::ShellUnavailable | EdgeError::Internal(_) | EdgeError::Upstream(_) => {
                    tracing::error!(request_id = %request_id, path = %path, error = %e, "Request degraded");
                }
                _ => {
                    tracing::info!(request_id = %request_id, path = %path, error = %e, "Request rejected");
                }
            }
            e.into_response()
        }
    };

    metrics::record_request(class.as_str(), response.status().as_u16(), start);
    response
}

async fn dispatch(
    state: &EdgeState,
    class: RouteClass,
    request: Request<Body>,
) -> Result<Response, EdgeError> {
    match class {
        RouteClass::ApiRoute => state.api.forward(request).await,
        RouteClass::StaticAsset | RouteClass::SpaFallback if !is_read(request.method()) => {
            Err(EdgeError::MethodNotAllowed(request.method().clone()))
        }
        RouteClass::StaticAsset => static_asset::serve(state, request.uri()).await,
        RouteClass::SpaFallback => shell::serve(state).await,
    }
}

fn timed_out(class: RouteClass, limit: Duration) -> EdgeError {
    let message = format!("request exceeded {}s", limit.as_secs());
    match class {
        RouteClass::ApiRoute => EdgeError::Upstream(message),
        RouteClass::StaticAsset | RouteClass::SpaFallback => EdgeError::Internal(message),
    }
}

fn is_read(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}
