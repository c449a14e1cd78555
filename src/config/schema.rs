//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge router.
//! All types derive Serde traits for deserialization from config files, and every
//! section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address, concurrency).
    pub listener: ListenerConfig,

    /// Asset store and classification tables.
    pub assets: AssetsConfig,

    /// Origin used when the asset store misses.
    pub origin: OriginConfig,

    /// API passthrough settings.
    pub api: ApiConfig,

    /// Cache-Control policy table.
    pub cache: CacheConfig,

    /// Security response headers and request limits.
    pub security: SecurityConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Liveness endpoint.
    pub health: HealthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum requests processed concurrently (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Asset store location and the tables that decide what counts as an asset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the SPA build output. `None` means an empty store.
    pub dir: Option<String>,

    /// Store key of the SPA shell document.
    pub shell: String,

    /// Path prefixes that are always treated as static assets.
    pub prefixes: Vec<String>,

    /// File extensions (without the dot) that mark a static asset.
    pub extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            shell: "index.html".to_string(),
            prefixes: vec!["/assets/".to_string()],
            extensions: [
                "js", "css", "png", "jpg", "jpeg", "gif", "ico", "svg", "woff", "woff2", "ttf",
                "eot", "json", "webp",
            ]
            .iter()
            .map(|e| e.to_string())
            .collect(),
        }
    }
}

/// Origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Base URL of the origin (e.g., "http://127.0.0.1:3000"). `None` disables origin fetches.
    pub base_url: Option<String>,

    /// Origin fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 5,
        }
    }
}

/// API passthrough configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Path prefix that marks an API request.
    pub prefix: String,

    /// Backend the API requests are forwarded to. `None` answers 404 JSON.
    pub upstream: Option<String>,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/".to_string(),
            upstream: None,
            timeout_secs: 15,
        }
    }
}

/// Cache-Control policy table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Max-age for fingerprinted bundles, sent with `immutable`.
    pub immutable_max_age_secs: u32,

    /// Extensions served with the immutable policy.
    pub immutable_extensions: Vec<String>,

    /// Max-age for images and fonts.
    pub medium_max_age_secs: u32,

    /// Extensions served with the medium policy.
    pub medium_extensions: Vec<String>,

    /// Max-age for every other static asset.
    pub default_max_age_secs: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            immutable_max_age_secs: 31_536_000,
            immutable_extensions: vec!["js".to_string(), "css".to_string()],
            medium_max_age_secs: 86_400,
            medium_extensions: [
                "png", "jpg", "jpeg", "gif", "ico", "svg", "webp", "woff", "woff2", "ttf", "eot",
            ]
            .iter()
            .map(|e| e.to_string())
            .collect(),
            default_max_age_secs: 3_600,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Content-Security-Policy sent with the shell document.
    pub content_security_policy: String,

    /// X-Frame-Options value.
    pub frame_options: String,

    /// Referrer-Policy value.
    pub referrer_policy: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            content_security_policy: "default-src 'self' https:; script-src 'self' 'unsafe-inline' https:; \
                 style-src 'self' 'unsafe-inline' https:; img-src 'self' data: https:; \
                 connect-src 'self' https: wss:"
                .to_string(),
            frame_options: "DENY".to_string(),
            referrer_policy: "strict-origin-when-cross-origin".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Health endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Serve the liveness endpoint.
    pub enabled: bool,

    /// Path of the liveness endpoint.
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/healthz".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
