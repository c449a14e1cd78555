//! Asset retrieval subsystem.
//!
//! # Data Flow
//! ```text
//! Static or shell request
//!     → resolver.rs (store first, origin on miss)
//!         → AssetStore (fs.rs directory, memory.rs map)
//!         → Origin (origin.rs HTTP pass-through)
//!     → AssetLookup { Store, Origin, Missing }
//! ```
//!
//! # Design Decisions
//! - Store and origin are injected trait objects, built once at startup
//! - The router only reads; nothing here writes or caches
//! - Store errors are reported, then treated like a miss so the origin still gets a chance

pub mod fs;
pub mod memory;
pub mod origin;
pub mod resolver;

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

pub use fs::DirectoryStore;
pub use memory::MemoryStore;
pub use origin::{HttpOrigin, Origin, OriginError};
pub use resolver::{AssetLookup, AssetResolver};

/// A static file as held by the store or returned by the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Raw file bytes.
    pub body: Bytes,
    /// Content type recorded alongside the bytes, if any.
    pub content_type: Option<String>,
}

impl Asset {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Error raised by an asset store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("rejected store key '{0}'")]
    InvalidKey(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only key-value store of static files.
///
/// Keys are request paths without the leading slash (`assets/app.js`).
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Short name used in logs.
    fn backend_tag(&self) -> &'static str;

    /// Fetch an asset. `Ok(None)` is a plain miss.
    async fn get(&self, key: &str) -> Result<Option<Asset>, StoreError>;
}
