//! Store-then-origin asset resolution.

use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;

use crate::assets::{Asset, AssetStore, Origin};
use crate::observability::metrics;

/// Where an asset lookup was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLookup {
    /// Found in the asset store.
    Store(Asset),
    /// Store missed, origin had it.
    Origin(Asset),
    /// Neither tier produced the asset.
    Missing,
}

impl AssetLookup {
    /// Label for logs, metrics and the `X-Edge-Source` header.
    pub fn source(&self) -> &'static str {
        match self {
            AssetLookup::Store(_) => "store",
            AssetLookup::Origin(_) => "origin",
            AssetLookup::Missing => "missing",
        }
    }

    pub fn into_asset(self) -> Option<Asset> {
        match self {
            AssetLookup::Store(asset) | AssetLookup::Origin(asset) => Some(asset),
            AssetLookup::Missing => None,
        }
    }
}

/// Resolves assets from the store, falling back to the origin.
#[derive(Clone)]
pub struct AssetResolver {
    store: Arc<dyn AssetStore>,
    origin: Option<Arc<dyn Origin>>,
}

impl fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetResolver")
            .field("store", &self.store.backend_tag())
            .field("origin", &self.origin.is_some())
            .finish()
    }
}

impl AssetResolver {
    pub fn new(store: Arc<dyn AssetStore>, origin: Option<Arc<dyn Origin>>) -> Self {
        Self { store, origin }
    }

    /// Look up `path` in the store (percent-decoded, leading slash stripped),
    /// then ask the origin for `origin_target` on a miss.
    ///
    /// Store errors are logged and treated as a miss; the two lookups run in
    /// sequence and the origin is only contacted when the store has nothing.
    pub async fn resolve(&self, path: &str, origin_target: &str) -> AssetLookup {
        let raw = path.strip_prefix('/').unwrap_or(path);

        match percent_decode_str(raw).decode_utf8() {
            Ok(key) => match self.store.get(&key).await {
                Ok(Some(asset)) => return self.record(AssetLookup::Store(asset)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        backend = self.store.backend_tag(),
                        key = %key,
                        error = %e,
                        "Asset store lookup failed"
                    );
                }
            },
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Path is not UTF-8 once decoded, skipping store");
            }
        }

        let Some(origin) = &self.origin else {
            return self.record(AssetLookup::Missing);
        };

        let lookup = match origin.fetch(origin_target).await {
            Ok(Some(asset)) => AssetLookup::Origin(asset),
            Ok(None) => AssetLookup::Missing,
            Err(e) => {
                tracing::warn!(target_path = %origin_target, error = %e, "Origin fetch failed");
                AssetLookup::Missing
            }
        };
        self.record(lookup)
    }

    fn record(&self, lookup: AssetLookup) -> AssetLookup {
        metrics::record_asset_lookup(lookup.source());
        lookup
    }
}
