//! HTTP cache control.
//!
//! Maps asset extensions to `Cache-Control` policies through a lookup table
//! built once from configuration.

use std::collections::HashMap;

use axum::http::HeaderValue;

use crate::config::CacheConfig;
use crate::routing::matcher::extension_of;

/// Cache-Control value for the SPA shell.
const SHELL_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// Cache-Control value for the fallback error page.
const NO_STORE: &str = "no-store";

/// Cache control policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Fingerprinted bundle: public, long max-age, never revalidated.
    Immutable(u32),
    /// Public cache with specified max-age (seconds).
    Public(u32),
    /// Must be fetched fresh on every navigation.
    Revalidate,
    /// Never stored.
    NoStore,
}

impl CachePolicy {
    /// Convert to Cache-Control header value.
    pub fn to_header_value(self) -> String {
        match self {
            Self::Immutable(max_age) => format!("public, max-age={max_age}, immutable"),
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::Revalidate => SHELL_CACHE_CONTROL.to_string(),
            Self::NoStore => NO_STORE.to_string(),
        }
    }

    /// The policy as a ready-to-insert header value.
    pub fn header_value(self) -> HeaderValue {
        match self {
            Self::Revalidate => HeaderValue::from_static(SHELL_CACHE_CONTROL),
            Self::NoStore => HeaderValue::from_static(NO_STORE),
            // Digits and ASCII only, so conversion cannot fail in practice.
            _ => HeaderValue::from_str(&self.to_header_value())
                .unwrap_or_else(|_| HeaderValue::from_static(NO_STORE)),
        }
    }
}

/// Extension → policy lookup table.
#[derive(Debug, Clone)]
pub struct CacheRules {
    by_extension: HashMap<String, CachePolicy>,
    default: CachePolicy,
}

impl CacheRules {
    pub fn from_config(config: &CacheConfig) -> Self {
        let mut by_extension = HashMap::new();
        for ext in &config.medium_extensions {
            by_extension.insert(
                ext.to_ascii_lowercase(),
                CachePolicy::Public(config.medium_max_age_secs),
            );
        }
        // Immutable entries are inserted last so they win on overlap.
        for ext in &config.immutable_extensions {
            by_extension.insert(
                ext.to_ascii_lowercase(),
                CachePolicy::Immutable(config.immutable_max_age_secs),
            );
        }
        Self {
            by_extension,
            default: CachePolicy::Public(config.default_max_age_secs),
        }
    }

    /// Policy for a static asset served at `path`.
    pub fn policy_for(&self, path: &str) -> CachePolicy {
        extension_of(path)
            .and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()))
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for CacheRules {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
