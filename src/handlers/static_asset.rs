//! Static asset handler.
//!
//! Store first, origin second, plain-text 404 last. A recognized static path
//! never degrades to the SPA shell, so broken asset references stay visible.

use axum::http::Uri;
use axum::response::Response;

use crate::error::EdgeError;
use crate::http::mime::resolve_content_type;
use crate::http::response::asset_response;
use crate::http::server::EdgeState;

pub async fn serve(state: &EdgeState, uri: &Uri) -> Result<Response, EdgeError> {
    let path = uri.path();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or(path);

    let lookup = state.assets.resolve(path, target).await;
    let source = lookup.source();
    let asset = lookup.into_asset().ok_or_else(|| EdgeError::AssetNotFound {
        path: path.to_string(),
    })?;

    let content_type = resolve_content_type(path, asset.content_type.as_deref());
    let policy = state.cache.policy_for(path);
    tracing::debug!(path = %path, source, content_type = %content_type, "Serving static asset");

    Ok(asset_response(asset.body, &content_type, policy, source))
}
