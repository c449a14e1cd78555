//! Request-level error taxonomy.
//!
//! Every variant renders to a response; nothing escapes to the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum EdgeError {
    /// Neither the store nor the origin has the static file.
    #[error("asset not found: {path}")]
    AssetNotFound { path: String },

    /// The SPA shell could not be retrieved from store or origin.
    #[error("SPA shell unavailable")]
    ShellUnavailable,

    /// API route with no backend to answer it.
    #[error("no API handler for {path}")]
    ApiNotFound { path: String },

    /// The API upstream failed or timed out.
    #[error("API upstream failed: {0}")]
    Upstream(String),

    /// The API request body could not be read within the size limit.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(axum::http::Method),

    /// Anything unexpected while handling the request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        match self {
            EdgeError::AssetNotFound { .. } => response::asset_not_found(),
            EdgeError::ApiNotFound { .. } => response::json_error(StatusCode::NOT_FOUND, "Not Found"),
            EdgeError::Upstream(_) => response::json_error(StatusCode::BAD_GATEWAY, "Bad Gateway"),
            EdgeError::InvalidBody(_) => response::json_error(StatusCode::BAD_REQUEST, "Bad Request"),
            EdgeError::MethodNotAllowed(_) => response::method_not_allowed(),
            EdgeError::ShellUnavailable | EdgeError::Internal(_) => {
                metrics::record_shell_fallback();
                response::fallback_page()
            }
        }
    }
}
