//! Edge router for a single-page web application.
//!
//! Classifies every request path as a static asset, an API route or an SPA
//! client-side route, and answers each class with its own caching and
//! security headers.

pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::EdgeConfig;
pub use error::EdgeError;
pub use http::{EdgeServer, EdgeState};
pub use lifecycle::Shutdown;
pub use routing::{RouteClass, RouteClassifier};
