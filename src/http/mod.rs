//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → middleware/preflight.rs (OPTIONS short-circuit)
//!     → [handlers classify and serve]
//!     → response.rs + mime.rs + cache.rs (headers per route class)
//!     → Send to client
//!
//! Outbound (origin fetches, API passthrough):
//!     → client.rs (shared hyper client)
//! ```

pub mod cache;
pub mod client;
pub mod middleware;
pub mod mime;
pub mod request;
pub mod response;
pub mod server;

pub use request::{EdgeRequestId, X_REQUEST_ID};
pub use server::{EdgeServer, EdgeState};
