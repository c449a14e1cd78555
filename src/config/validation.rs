//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0, addresses parse)
//! - Validate path prefixes and extension tables
//! - Detect a health path shadowed by the API prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use axum::http::Uri;

use crate::config::schema::EdgeConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `origin.base_url`).
    pub field: String,
    /// Human readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::new("listener.max_connections", "must be greater than 0"));
    }

    if config.assets.shell.is_empty() || config.assets.shell.starts_with('/') {
        errors.push(ValidationError::new(
            "assets.shell",
            "must be a store key without a leading slash",
        ));
    }
    for (i, prefix) in config.assets.prefixes.iter().enumerate() {
        check_prefix(&mut errors, &format!("assets.prefixes[{i}]"), prefix);
    }
    check_extensions(&mut errors, "assets.extensions", &config.assets.extensions);
    check_extensions(&mut errors, "cache.immutable_extensions", &config.cache.immutable_extensions);
    check_extensions(&mut errors, "cache.medium_extensions", &config.cache.medium_extensions);

    check_prefix(&mut errors, "api.prefix", &config.api.prefix);
    if let Some(upstream) = &config.api.upstream {
        check_http_url(&mut errors, "api.upstream", upstream);
    }
    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::new("api.timeout_secs", "must be greater than 0"));
    }

    if let Some(base_url) = &config.origin.base_url {
        check_http_url(&mut errors, "origin.base_url", base_url);
    }
    if config.origin.timeout_secs == 0 {
        errors.push(ValidationError::new("origin.timeout_secs", "must be greater than 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    } else {
        // Inner fetches must give up before the whole request does.
        let request_secs = config.timeouts.request_secs;
        for (field, secs) in [
            ("origin.timeout_secs", config.origin.timeout_secs),
            ("api.timeout_secs", config.api.timeout_secs),
        ] {
            if secs >= request_secs {
                errors.push(ValidationError::new(
                    field,
                    format!("{secs}s must be shorter than timeouts.request_secs ({request_secs}s)"),
                ));
            }
        }
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.health.enabled {
        if !config.health.path.starts_with('/') {
            errors.push(ValidationError::new("health.path", "must start with '/'"));
        } else if config.health.path.starts_with(&config.api.prefix) {
            errors.push(ValidationError::new(
                "health.path",
                format!("collides with api prefix '{}'", config.api.prefix),
            ));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_prefix(errors: &mut Vec<ValidationError>, field: &str, prefix: &str) {
    if !prefix.starts_with('/') || !prefix.ends_with('/') || prefix.len() < 2 {
        errors.push(ValidationError::new(
            field,
            format!("'{prefix}' must start and end with '/'"),
        ));
    }
}

fn check_extensions(errors: &mut Vec<ValidationError>, field: &str, extensions: &[String]) {
    for ext in extensions {
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            errors.push(ValidationError::new(
                field,
                format!("'{ext}' must be a bare extension such as 'js'"),
            ));
        }
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &str, url: &str) {
    match url.parse::<Uri>() {
        Ok(uri) if uri.scheme_str() == Some("http") && uri.authority().is_some() => {}
        _ => errors.push(ValidationError::new(
            field,
            format!("'{url}' must be an absolute http:// URL"),
        )),
    }
}
