//! Configuration loading and merging.
//!
//! # Data Flow
//! ```text
//! ServerConfig::defaults_for(run mode)
//!     → TOML file overrides (--config, optional)
//!     → CLI flag overrides
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, frozen)
//!     → shared via Arc to all request handlers
//! ```
//!
//! The file and the command line share one sparse override structure, so a
//! TOML key and its CLI flag spell the same setting.

use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::config::schema::{ProxyMode, RunMode, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sparse configuration overrides.
///
/// Doubles as the CLI flag set of `start`/`start-dev` and the schema of the
/// optional TOML configuration file. Every field is optional; unset fields
/// keep the run-mode defaults.
#[derive(Debug, Clone, Default, Args, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Fixed front-end host advertised to clients.
    #[arg(long)]
    pub hostname: Option<String>,

    /// Fully explicit front-end base URL (overrides hostname).
    #[arg(long)]
    pub hostname_url: Option<Url>,

    /// Enable hostname-driven resolution.
    #[arg(long)]
    pub hostname_strict: Option<bool>,

    /// Force the https scheme when resolving from the hostname.
    #[arg(long)]
    pub hostname_strict_https: Option<bool>,

    /// Make the back-end URL equal the front-end URL.
    #[arg(long)]
    pub hostname_strict_backchannel: Option<bool>,

    /// Explicit front-end port, overriding every other port rule.
    #[arg(long)]
    pub hostname_port: Option<u16>,

    /// URL path prefix for all resolved URLs.
    #[arg(long)]
    pub hostname_path: Option<String>,

    /// Host override for the admin console URL.
    #[arg(long)]
    pub hostname_admin: Option<String>,

    /// Fully explicit admin base URL (overrides hostname-admin).
    #[arg(long)]
    pub hostname_admin_url: Option<Url>,

    /// Enable the hostname diagnostic endpoint.
    #[arg(long)]
    pub hostname_debug: Option<bool>,

    /// Reverse proxy mode.
    #[arg(long, value_enum)]
    pub proxy: Option<ProxyMode>,

    /// Port of the plain HTTP listener.
    #[arg(long)]
    pub http_port: Option<u16>,

    /// Port of the TLS listener.
    #[arg(long)]
    pub https_port: Option<u16>,

    /// Serve plain HTTP.
    #[arg(long)]
    pub http_enabled: Option<bool>,

    /// TLS certificate chain file (PEM).
    #[arg(long, value_name = "FILE")]
    pub https_certificate_file: Option<PathBuf>,

    /// TLS private key file (PEM).
    #[arg(long, value_name = "FILE")]
    pub https_certificate_key_file: Option<PathBuf>,

    /// Known realm names.
    #[arg(long, value_delimiter = ',')]
    pub realms: Option<Vec<String>>,
}

/// Build the frozen configuration for a run mode.
///
/// Applies the TOML file first (when `--config` is given), then the CLI
/// flags, then validates the result. Any failure here aborts startup.
pub fn load_config(run_mode: RunMode, overrides: &ConfigOverrides) -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::defaults_for(run_mode);

    if let Some(path) = &overrides.config {
        let content = fs::read_to_string(path)?;
        let file_overrides = parse_overrides(&content)?;
        apply_overrides(&mut config, &file_overrides);
    }

    apply_overrides(&mut config, overrides);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML override document.
pub fn parse_overrides(content: &str) -> Result<ConfigOverrides, ConfigError> {
    Ok(toml::from_str(content)?)
}

fn apply_overrides(config: &mut ServerConfig, overrides: &ConfigOverrides) {
    let hostname = &mut config.hostname;
    if let Some(v) = &overrides.hostname {
        hostname.hostname = Some(v.clone());
    }
    if let Some(v) = &overrides.hostname_url {
        hostname.hostname_url = Some(v.clone());
    }
    if let Some(v) = overrides.hostname_strict {
        hostname.strict = v;
    }
    if let Some(v) = overrides.hostname_strict_https {
        hostname.strict_https = v;
    }
    if let Some(v) = overrides.hostname_strict_backchannel {
        hostname.strict_backchannel = v;
    }
    if let Some(v) = overrides.hostname_port {
        hostname.hostname_port = Some(v);
    }
    if let Some(v) = &overrides.hostname_path {
        hostname.path = Some(v.clone());
    }
    if let Some(v) = &overrides.hostname_admin {
        hostname.admin_hostname = Some(v.clone());
    }
    if let Some(v) = &overrides.hostname_admin_url {
        hostname.admin_url = Some(v.clone());
    }
    if let Some(v) = overrides.hostname_debug {
        hostname.debug_enabled = v;
    }
    if let Some(v) = overrides.proxy {
        hostname.proxy_mode = v;
    }
    if let Some(v) = overrides.http_port {
        hostname.http_port = v;
    }
    if let Some(v) = overrides.https_port {
        hostname.https_port = v;
    }

    let listener = &mut config.listener;
    if let Some(v) = overrides.http_enabled {
        listener.http_enabled = v;
    }
    if let Some(v) = &overrides.https_certificate_file {
        listener.https_certificate_file = Some(v.clone());
    }
    if let Some(v) = &overrides.https_certificate_key_file {
        listener.https_certificate_key_file = Some(v.clone());
    }

    if let Some(v) = &overrides.realms {
        config.realms = v.clone();
    }
}
