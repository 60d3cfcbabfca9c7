//! HTTP surface of the server.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection (per-listener ConnectionContext)
//!     → server.rs (Axum setup, middleware, request ID)
//!     → hostname::origin (explicit RequestOrigin per request)
//!     → hostname::resolver (ResolvedEndpoints)
//!     → discovery.rs / authorize.rs / welcome.rs / debug.rs
//! ```

pub mod authorize;
pub mod debug;
pub mod discovery;
pub mod request;
pub mod server;
pub mod welcome;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, ConnectionContext, HttpServer};
