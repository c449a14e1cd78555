//! Directory-backed asset store.
//!
//! Serves the SPA build output (`dist/`) from disk. Keys map to paths under the
//! root; anything that could climb out of the root is rejected before touching
//! the filesystem.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::assets::{Asset, AssetStore, StoreError};

/// Asset store reading files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains('\\') || key.contains('\0') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetStore for DirectoryStore {
    fn backend_tag(&self) -> &'static str {
        "directory"
    }

    async fn get(&self, key: &str) -> Result<Option<Asset>, StoreError> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(Asset::new(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            // Reading a directory reports an OS-specific error kind.
            Err(_) if path.is_dir() => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
