//! Header tables: CORS, security response headers, hop-by-hop stripping.
//!
//! # Responsibilities
//! - CORS headers for preflight answers and cross-origin asset loads
//! - Security headers for the SPA shell (nosniff, frame, referrer, CSP)
//! - Strip hop-by-hop headers before forwarding API requests
//!
//! # Design Decisions
//! - Tables are fixed at startup; headers are copied into each response
//! - CSP is always present on the shell, even when configured permissive

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, CONNECTION, CONTENT_SECURITY_POLICY,
    PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, REFERRER_POLICY, TE, TRAILER, TRANSFER_ENCODING,
    UPGRADE, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
};

use crate::config::SecurityConfig;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const CORS_MAX_AGE: &str = "86400";

/// Headers answered to every `OPTIONS` preflight.
pub fn apply_preflight(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(CORS_ALLOW_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(CORS_ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(CORS_ALLOW_HEADERS));
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(CORS_MAX_AGE));
}

/// Allow any origin to load the response.
pub fn apply_allow_origin(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(CORS_ALLOW_ORIGIN));
}

/// Security headers attached to the SPA shell.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    /// Build the table. Values that are not valid header text fall back to the defaults.
    pub fn from_config(config: &SecurityConfig) -> Self {
        let defaults = SecurityConfig::default();
        let value = |configured: &str, fallback: &str| {
            HeaderValue::from_str(configured).unwrap_or_else(|_| {
                tracing::warn!(value = %configured, "Invalid security header value, using default");
                HeaderValue::from_str(fallback).unwrap_or_else(|_| HeaderValue::from_static(""))
            })
        };

        Self {
            entries: vec![
                (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
                (X_FRAME_OPTIONS, value(&config.frame_options, &defaults.frame_options)),
                (REFERRER_POLICY, value(&config.referrer_policy, &defaults.referrer_policy)),
                (
                    CONTENT_SECURITY_POLICY,
                    value(&config.content_security_policy, &defaults.content_security_policy),
                ),
            ],
        }
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.entries {
            headers.insert(name.clone(), value.clone());
        }
    }
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::from_config(&SecurityConfig::default())
    }
}

/// Remove hop-by-hop headers (RFC 9110 §7.6.1), including any named in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();
    for name in named {
        headers.remove(name);
    }

    for name in [
        CONNECTION,
        PROXY_AUTHENTICATE,
        PROXY_AUTHORIZATION,
        TE,
        TRAILER,
        TRANSFER_ENCODING,
        UPGRADE,
    ] {
        headers.remove(name);
    }
    headers.remove("keep-alive");
    headers.remove("proxy-connection");
}
