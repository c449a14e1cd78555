//! Request classification.
//!
//! # Responsibilities
//! - Decide whether a path is a static asset, an API call, or a client route
//! - Stay a pure function of the path so identical requests classify identically
//!
//! # Design Decisions
//! - Compiled once from config, immutable at runtime (shared without locks)
//! - API prefix is checked first so `/api/report.json` reaches the backend
//! - Anything unrecognized is a client route and gets the SPA shell

use std::fmt;

use crate::config::{ApiConfig, AssetsConfig};
use crate::routing::matcher::{AnyMatcher, ExtensionMatcher, Matcher, PathPrefixMatcher};

/// Outcome of classifying a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// A file from the build output.
    StaticAsset,
    /// A call for the application backend.
    ApiRoute,
    /// A client-side route; answered with the SPA shell.
    SpaFallback,
}

impl RouteClass {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteClass::StaticAsset => "static",
            RouteClass::ApiRoute => "api",
            RouteClass::SpaFallback => "spa",
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies paths using the configured prefix and extension tables.
#[derive(Debug)]
pub struct RouteClassifier {
    api: PathPrefixMatcher,
    assets: AnyMatcher,
}

impl RouteClassifier {
    /// Build the classifier from configuration.
    pub fn from_config(assets: &AssetsConfig, api: &ApiConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = assets
            .prefixes
            .iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p.clone())) as Box<dyn Matcher>)
            .collect();
        matchers.push(Box::new(ExtensionMatcher::new(&assets.extensions)));

        Self {
            api: PathPrefixMatcher::new(api.prefix.clone()),
            assets: AnyMatcher::new(matchers),
        }
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.api.matches(path) {
            RouteClass::ApiRoute
        } else if self.assets.matches(path) {
            RouteClass::StaticAsset
        } else {
            RouteClass::SpaFallback
        }
    }
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self::from_config(&AssetsConfig::default(), &ApiConfig::default())
    }
}
