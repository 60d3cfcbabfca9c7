//! Request origin extraction.
//!
//! # Responsibilities
//! - Capture the scheme/host/port a request actually used to reach the server
//! - Honor X-Forwarded-Proto / X-Forwarded-Host / X-Forwarded-Port, but only
//!   when a proxy mode is configured
//! - Parse Host headers with optional ports, including bracketed IPv6
//!
//! # Design Decisions
//! - The origin is an explicit value passed into the resolver; there is no
//!   thread-local or ambient request state
//! - Forwarded headers from untrusted sources are ignored (no proxy configured
//!   means no proxy is trusted)

use axum::http::{header, HeaderMap};
use std::fmt;

/// URL scheme of an origin or resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Implicit port of the scheme, omitted from formatted URLs.
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    /// Case-insensitive parse; anything other than http/https is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("http") {
            Some(Scheme::Http)
        } else if value.eq_ignore_ascii_case("https") {
            Some(Scheme::Https)
        } else {
            None
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme, host and port as actually used to reach the server.
///
/// One instance per request, immutable. Behind a proxy these are the values
/// the proxy forwarded; otherwise the literal connection values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl RequestOrigin {
    pub fn new(scheme: Scheme, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
        }
    }

    /// Extract the origin of an inbound request.
    ///
    /// `fallback_scheme` and `fallback_port` describe the listener the
    /// connection arrived on; they apply when headers leave a value open.
    /// Forwarded headers are consulted only when `trust_forwarded` is set,
    /// i.e. when a proxy mode is configured.
    pub fn from_request(
        fallback_scheme: Scheme,
        fallback_port: u16,
        headers: &HeaderMap,
        trust_forwarded: bool,
    ) -> Self {
        let host_header = header_str(headers, header::HOST.as_str());

        if trust_forwarded {
            let scheme = header_str(headers, "x-forwarded-proto")
                .and_then(Scheme::parse)
                .unwrap_or(fallback_scheme);
            let authority = header_str(headers, "x-forwarded-host")
                .or(host_header)
                .unwrap_or("localhost");
            let (host, authority_port) = parse_host_port(authority);
            let port = header_str(headers, "x-forwarded-port")
                .and_then(|p| p.parse().ok())
                .or(authority_port)
                .unwrap_or_else(|| scheme.default_port());
            return Self::new(scheme, host, port);
        }

        let (host, authority_port) = parse_host_port(host_header.unwrap_or("localhost"));
        let port = authority_port.unwrap_or(fallback_port);
        Self::new(fallback_scheme, host, port)
    }
}

impl fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Split an authority into host and optional port. IPv6 literals keep their
/// brackets as part of the host.
fn parse_host_port(authority: &str) -> (String, Option<u16>) {
    if let Some(colon) = authority.rfind(':') {
        if authority.starts_with('[') {
            // Bracketed IPv6; a port only follows the closing bracket.
            if let Some(bracket) = authority.find(']') {
                if colon > bracket {
                    let port = authority[colon + 1..].parse().ok();
                    return (authority[..colon].to_string(), port);
                }
            }
            return (authority.to_string(), None);
        }
        if let Ok(port) = authority[colon + 1..].parse() {
            return (authority[..colon].to_string(), Some(port));
        }
    }
    (authority.to_string(), None)
}
