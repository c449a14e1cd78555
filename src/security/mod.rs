//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (nosniff, frame options, referrer policy, CSP on the shell)
//!     → headers.rs (CORS allow-origin on assets and API errors)
//!
//! Forwarded request/response:
//!     → headers.rs (strip hop-by-hop headers)
//! ```

pub mod headers;
