//! In-memory asset store.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::assets::{Asset, AssetStore, StoreError};

/// Asset store backed by a map, filled before the server starts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    assets: HashMap<String, Asset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset under `key` (leading slash is ignored).
    pub fn insert(&mut self, key: impl AsRef<str>, asset: Asset) {
        let key = key.as_ref();
        let key = key.strip_prefix('/').unwrap_or(key);
        self.assets.insert(key.to_string(), asset);
    }

    /// Builder-style variant of [`MemoryStore::insert`].
    pub fn with(mut self, key: impl AsRef<str>, asset: Asset) -> Self {
        self.insert(key, asset);
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Asset>, StoreError> {
        Ok(self.assets.get(key).cloned())
    }
}
