//! SPA fallback handler.
//!
//! Every client route gets the same shell document with status 200; the
//! browser-side router renders the actual page.

use axum::response::Response;

use crate::error::EdgeError;
use crate::http::response::shell_response;
use crate::http::server::EdgeState;

pub async fn serve(state: &EdgeState) -> Result<Response, EdgeError> {
    let target = format!("/{}", state.shell_key);
    let lookup = state.assets.resolve(&target, &target).await;
    let source = lookup.source();
    let asset = lookup.into_asset().ok_or(EdgeError::ShellUnavailable)?;

    Ok(shell_response(asset.body, &state.security, source))
}
