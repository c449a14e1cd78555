//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the asset store, origin and API passthrough from configuration
//! - Assemble them into the shared request state and the HTTP server
//!
//! # Design Decisions
//! - Fail fast: a missing asset directory or malformed origin URL is fatal
//! - Without an asset directory the store starts empty and every lookup
//!   falls through to the origin

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::assets::{AssetResolver, AssetStore, DirectoryStore, HttpOrigin, MemoryStore, Origin, OriginError};
use crate::config::EdgeConfig;
use crate::handlers::ApiPassthrough;
use crate::http::client::build_client;
use crate::http::{EdgeServer, EdgeState};

/// Error raised while assembling the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("asset directory '{0}' does not exist or is not a directory")]
    AssetsDir(String),
    #[error("origin: {0}")]
    Origin(#[from] OriginError),
}

/// Construct every collaborator named by `config` and wire them into an [`EdgeServer`].
pub fn build_server(config: EdgeConfig) -> Result<EdgeServer, StartupError> {
    let client = build_client();

    let store: Arc<dyn AssetStore> = match &config.assets.dir {
        Some(dir) => {
            if !Path::new(dir).is_dir() {
                return Err(StartupError::AssetsDir(dir.clone()));
            }
            tracing::info!(dir = %dir, "Serving assets from directory");
            Arc::new(DirectoryStore::new(dir))
        }
        None => {
            tracing::warn!("No asset directory configured, relying on origin only");
            Arc::new(MemoryStore::new())
        }
    };

    let origin: Option<Arc<dyn Origin>> = match &config.origin.base_url {
        Some(base_url) => {
            let origin = HttpOrigin::new(
                client.clone(),
                base_url,
                Duration::from_secs(config.origin.timeout_secs),
            )?;
            tracing::info!(origin = %base_url, "Origin pass-through enabled");
            Some(Arc::new(origin))
        }
        None => None,
    };

    let api = ApiPassthrough::new(
        config.api.upstream.as_deref(),
        client,
        Duration::from_secs(config.api.timeout_secs),
        config.security.max_body_size,
    );
    if !api.is_enabled() {
        tracing::info!(prefix = %config.api.prefix, "No API upstream, API routes answer 404");
    }

    let state = EdgeState::new(&config, AssetResolver::new(store, origin), api);
    Ok(EdgeServer::new(&config, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_builds() {
        assert!(build_server(EdgeConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn missing_asset_dir_is_fatal() {
        let mut config = EdgeConfig::default();
        config.assets.dir = Some("/definitely/not/here".into());
        assert!(matches!(build_server(config), Err(StartupError::AssetsDir(_))));
    }

    #[tokio::test]
    async fn malformed_origin_is_fatal() {
        let mut config = EdgeConfig::default();
        config.origin.base_url = Some("not a url".into());
        assert!(matches!(build_server(config), Err(StartupError::Origin(_))));
    }

    #[tokio::test]
    async fn existing_asset_dir_builds() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EdgeConfig::default();
        config.assets.dir = Some(dir.path().display().to_string());
        assert!(build_server(config).is_ok());
    }
}
