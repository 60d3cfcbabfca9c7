//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / config file (TOML)
//!     → loader.rs (defaults for run mode, merge overrides)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to all request handlers
//! ```
//!
//! # Design Decisions
//! - Config is write-once at startup; there is no reload path
//! - All fields have defaults so a dev launch needs no flags
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigOverrides, ConfigError};
pub use schema::{HostnameConfig, ListenerConfig, ProxyMode, RunMode, ServerConfig};
