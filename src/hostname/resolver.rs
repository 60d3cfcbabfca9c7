//! Base URL resolution.
//!
//! # Responsibilities
//! - Compute the front-end, back-end and admin base URLs for one request
//! - Apply the precedence rules between explicit URLs, the configured
//!   hostname and the request origin
//! - Normalize every produced URL (single trailing slash, default ports
//!   omitted)
//!
//! # Design Decisions
//! - Resolution is a pure function over `(HostnameConfig, RequestOrigin)`;
//!   no I/O, no shared mutable state, always returns
//! - Scheme and port are decided together, never mixed from different
//!   sources
//! - Endpoints are produced fresh per request; nothing is cached

use std::fmt;
use url::Url;

use crate::config::schema::HostnameConfig;
use crate::hostname::origin::{RequestOrigin, Scheme};
use crate::hostname::proxy;

/// A normalized absolute base URL.
///
/// The port is omitted when it equals the scheme's implicit default, and the
/// path always starts and ends with exactly one slash. Instances are
/// immutable, so formatting is idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    path: String,
}

impl ResolvedUrl {
    pub fn new(scheme: Scheme, host: impl Into<String>, port: Option<u16>, path: &str) -> Self {
        Self {
            scheme,
            host: host.into(),
            port: port.filter(|p| *p != scheme.default_port()),
            path: normalize_path(Some(path)),
        }
    }

    /// Build from an explicit configured URL, appending an extra path prefix.
    fn from_url(url: &Url, extra_path: Option<&str>) -> Self {
        let scheme = match url.scheme() {
            "https" => Scheme::Https,
            _ => Scheme::Http,
        };
        Self {
            scheme,
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port(),
            path: join_paths(url.path(), extra_path),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, if one appears in the formatted URL.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Port the URL reaches, explicit or implied by the scheme.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.scheme.default_port())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Same URL with the host swapped; scheme, port and path unchanged.
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..self.clone()
        }
    }

    /// Append a relative path to the base. The base always ends with a
    /// slash, so the result never doubles one.
    pub fn join(&self, relative: &str) -> String {
        format!("{}{}", self, relative.trim_start_matches('/'))
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)
    }
}

/// The three base URLs advertised for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    /// Externally advertised base for browser-facing endpoints.
    pub frontend: ResolvedUrl,
    /// Base for server-to-server exchanges.
    pub backend: ResolvedUrl,
    /// Base for the admin console and admin redirect URIs.
    pub admin: ResolvedUrl,
}

impl ResolvedEndpoints {
    /// The admin console link shown to users.
    pub fn admin_link(&self) -> String {
        self.admin.join("admin/")
    }
}

/// Resolve the advertised base URLs for one request.
pub fn resolve(config: &HostnameConfig, origin: &RequestOrigin) -> ResolvedEndpoints {
    let frontend = resolve_frontend(config, origin);

    let backend = if config.strict_backchannel {
        frontend.clone()
    } else {
        ResolvedUrl::new(
            origin.scheme,
            origin.host.clone(),
            Some(origin.port),
            config.path.as_deref().unwrap_or(""),
        )
    };

    let admin = resolve_admin(config, &frontend);

    tracing::debug!(
        origin = %origin,
        frontend = %frontend,
        backend = %backend,
        admin = %admin,
        "Resolved base URLs"
    );

    ResolvedEndpoints {
        frontend,
        backend,
        admin,
    }
}

fn resolve_frontend(config: &HostnameConfig, origin: &RequestOrigin) -> ResolvedUrl {
    let path = config.path.as_deref().unwrap_or("");

    // Strict disabled: the request origin drives everything.
    if !config.strict {
        return ResolvedUrl::new(origin.scheme, origin.host.clone(), Some(origin.port), path);
    }

    // An explicit URL wins over the origin entirely, scheme included.
    if let Some(url) = &config.hostname_url {
        return ResolvedUrl::from_url(url, config.path.as_deref());
    }

    // Validation guarantees a hostname here; the origin host is a fallback
    // that keeps the function total.
    let host = config
        .hostname
        .clone()
        .unwrap_or_else(|| origin.host.clone());
    let (scheme, port) = proxy::frontend_scheme_and_port(config, origin);

    ResolvedUrl::new(scheme, host, port, path)
}

fn resolve_admin(config: &HostnameConfig, frontend: &ResolvedUrl) -> ResolvedUrl {
    if let Some(url) = &config.admin_url {
        return ResolvedUrl::from_url(url, None);
    }
    if let Some(host) = &config.admin_hostname {
        return frontend.with_host(host.clone());
    }
    frontend.clone()
}

/// Normalize a path prefix to `/seg/.../` form; empty input becomes `/`.
fn normalize_path(path: Option<&str>) -> String {
    let segments: Vec<&str> = path
        .unwrap_or("")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

fn join_paths(base: &str, extra: Option<&str>) -> String {
    let combined: Vec<&str> = base
        .split('/')
        .chain(extra.unwrap_or("").split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    if combined.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", combined.join("/"))
    }
}
