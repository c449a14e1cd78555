//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → classifier.rs (API prefix, then asset rules)
//!     → matcher.rs (evaluate prefix / extension conditions)
//!     → Return: RouteClass { StaticAsset, ApiRoute, SpaFallback }
//!
//! Classifier Compilation (at startup):
//!     AssetsConfig + ApiConfig
//!     → Compile matchers (prefix list, extension set)
//!     → Freeze as immutable RouteClassifier
//! ```
//!
//! # Design Decisions
//! - Tables compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same path always yields the same class
//! - Total: every path has a class, unknown paths go to the SPA shell

pub mod classifier;
pub mod matcher;

pub use classifier::{RouteClass, RouteClassifier};
