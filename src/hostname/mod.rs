//! Hostname resolution subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → origin.rs (explicit RequestOrigin: scheme/host/port, forwarded
//!       headers honored behind a configured proxy)
//!     → resolver.rs + proxy.rs (pure precedence engine over the frozen
//!       HostnameConfig)
//!     → ResolvedEndpoints (front-end / back-end / admin base URLs)
//!     → discovery metadata, welcome page, admin console
//!     → validator.rs (redirect URI accept/reject per request)
//! ```
//!
//! # Design Decisions
//! - Resolution is a total synchronous function; config problems fail at
//!   startup, never here
//! - Per-request values are never cached across requests

pub mod origin;
pub mod proxy;
pub mod resolver;
pub mod validator;

pub use origin::{RequestOrigin, Scheme};
pub use resolver::{resolve, ResolvedEndpoints, ResolvedUrl};
pub use validator::{RedirectUriError, RedirectUriValidator};
