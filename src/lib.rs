//! oxidp — OpenID Connect identity provider.
//!
//! The core of the server is a pure hostname resolution engine: for every
//! request it computes the front-end, back-end and admin base URLs from the
//! frozen configuration and the request origin. Discovery metadata, the
//! welcome page, the admin console and redirect-URI validation all consume
//! that resolution.

pub mod cli;
pub mod config;
pub mod hostname;
pub mod http;
pub mod observability;
pub mod realm;

pub use config::schema::ServerConfig;
pub use hostname::resolver::{resolve, ResolvedEndpoints, ResolvedUrl};
pub use http::HttpServer;
