//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits; defaults match a plain production
//! deployment (HTTP on 8080, TLS on 8443, strict hostname resolution).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Root configuration for the identity-provider server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// How the server was launched; feeds the debug endpoint's mode label.
    pub run_mode: RunMode,

    /// Hostname resolution settings.
    pub hostname: HostnameConfig,

    /// Listener configuration (plain HTTP and TLS).
    pub listener: ListenerConfig,

    /// Known realm names. Requests scoped to any other realm are not found.
    pub realms: Vec<String>,
}

impl ServerConfig {
    /// Baseline configuration for a run mode, before file/CLI overrides.
    ///
    /// Development relaxes strict hostname resolution so the server answers
    /// on whatever address it was reached at.
    pub fn defaults_for(run_mode: RunMode) -> Self {
        let mut config = Self {
            run_mode,
            ..Self::default()
        };
        if run_mode == RunMode::Development {
            config.hostname.strict = false;
        }
        config
    }
}

/// Hostname resolution configuration.
///
/// Validated once at startup and frozen; resolution reads it without locks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostnameConfig {
    /// Fixed front-end host advertised to clients.
    pub hostname: Option<String>,

    /// Fully explicit front-end base URL. Takes precedence over `hostname`;
    /// the request origin is ignored entirely when this is set.
    pub hostname_url: Option<Url>,

    /// Enables hostname-driven resolution at all. When false, every
    /// resolved URL mirrors the request origin.
    pub strict: bool,

    /// Force the https scheme when resolving from `hostname`.
    pub strict_https: bool,

    /// Make the back-end (token) URL equal the front-end URL instead of
    /// mirroring the request.
    pub strict_backchannel: bool,

    /// Explicit front-end port. Overrides every other port rule.
    pub hostname_port: Option<u16>,

    /// Port of the plain HTTP listener.
    pub http_port: u16,

    /// Port of the TLS listener, also used when forcing https.
    pub https_port: u16,

    /// URL path prefix for all resolved URLs.
    pub path: Option<String>,

    /// How a fronting reverse proxy relates to TLS termination.
    pub proxy_mode: ProxyMode,

    /// Host override for the admin console URL.
    pub admin_hostname: Option<String>,

    /// Fully explicit admin base URL. Wins over `admin_hostname`.
    pub admin_url: Option<Url>,

    /// Enables the hostname diagnostic endpoint.
    pub debug_enabled: bool,
}

impl Default for HostnameConfig {
    fn default() -> Self {
        Self {
            hostname: None,
            hostname_url: None,
            strict: true,
            strict_https: true,
            strict_backchannel: false,
            hostname_port: None,
            http_port: 8080,
            https_port: 8443,
            path: None,
            proxy_mode: ProxyMode::None,
            admin_hostname: None,
            admin_url: None,
            debug_enabled: false,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Serve plain HTTP on `hostname.http_port`.
    pub http_enabled: bool,

    /// Path to the TLS certificate chain (PEM). TLS is served on
    /// `hostname.https_port` when both certificate and key are set.
    pub https_certificate_file: Option<PathBuf>,

    /// Path to the TLS private key (PEM).
    pub https_certificate_key_file: Option<PathBuf>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            http_enabled: true,
            https_certificate_file: None,
            https_certificate_key_file: None,
        }
    }
}

/// Relationship between a fronting reverse proxy and TLS termination.
///
/// Modeled as a closed variant so the resolver handles every mode
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProxyMode {
    /// No proxy; clients reach the server directly.
    #[default]
    None,
    /// Proxy terminates TLS and forwards the original scheme/host.
    Edge,
    /// Proxy terminates TLS and re-establishes it towards the server.
    Reencrypt,
    /// Proxy passes TLS through untouched.
    Passthrough,
}

/// How the server was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Production,
    Development,
}

impl RunMode {
    /// Label rendered by the diagnostic endpoint, e.g. `production [start]`.
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Production => "production [start]",
            RunMode::Development => "development [start-dev]",
        }
    }
}
