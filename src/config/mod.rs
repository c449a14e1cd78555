//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → consumed once at startup to build the router tables
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    ApiConfig, AssetsConfig, CacheConfig, EdgeConfig, HealthConfig, ListenerConfig,
    ObservabilityConfig, OriginConfig, SecurityConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
