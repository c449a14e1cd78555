//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and asset resolution produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through log fields and the `x-request-id` header
//! - Metrics are cheap and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
