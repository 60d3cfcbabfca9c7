//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect conflicting hostname settings
//! - Validate value ranges (ports non-zero, URLs absolute http/https)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ServerConfig;

/// A single semantic configuration problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("hostname and hostname-url are mutually exclusive")]
    HostnameUrlConflict,

    #[error("hostname-port must not be set when hostname-url is set")]
    PortWithExplicitUrl,

    #[error("hostname-admin must not be set when hostname-url is set")]
    AdminHostWithExplicitUrl,

    #[error("strict hostname resolution requires hostname or hostname-url")]
    MissingHostname,

    #[error("{0} must be an absolute http or https URL with a host")]
    InvalidExplicitUrl(&'static str),

    #[error("{0} must not be zero")]
    ZeroPort(&'static str),

    #[error("https-certificate-file and https-certificate-key-file must be set together")]
    IncompleteTls,
}

/// Validate a frozen configuration snapshot, collecting every problem.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let hostname = &config.hostname;

    if hostname.hostname_url.is_some() {
        if hostname.hostname.is_some() {
            errors.push(ValidationError::HostnameUrlConflict);
        }
        if hostname.hostname_port.is_some() {
            errors.push(ValidationError::PortWithExplicitUrl);
        }
        if hostname.admin_hostname.is_some() {
            errors.push(ValidationError::AdminHostWithExplicitUrl);
        }
    }

    if hostname.strict && hostname.hostname.is_none() && hostname.hostname_url.is_none() {
        errors.push(ValidationError::MissingHostname);
    }

    if let Some(url) = &hostname.hostname_url {
        if !is_http_base(url) {
            errors.push(ValidationError::InvalidExplicitUrl("hostname-url"));
        }
    }
    if let Some(url) = &hostname.admin_url {
        if !is_http_base(url) {
            errors.push(ValidationError::InvalidExplicitUrl("hostname-admin-url"));
        }
    }

    if hostname.http_port == 0 {
        errors.push(ValidationError::ZeroPort("http-port"));
    }
    if hostname.https_port == 0 {
        errors.push(ValidationError::ZeroPort("https-port"));
    }
    if hostname.hostname_port == Some(0) {
        errors.push(ValidationError::ZeroPort("hostname-port"));
    }

    let listener = &config.listener;
    if listener.https_certificate_file.is_some() != listener.https_certificate_key_file.is_some() {
        errors.push(ValidationError::IncompleteTls);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_base(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}
