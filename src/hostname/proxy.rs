//! Proxy mode scheme/port policy.
//!
//! # Responsibilities
//! - Decide the front-end scheme and port for hostname-driven resolution
//! - Handle every proxy mode exhaustively
//!
//! # Design Decisions
//! - `edge`, `reencrypt` and `passthrough` share one policy: a fronting proxy
//!   owns the default ports, so the port is omitted unless hostname-port is
//!   set, and the scheme follows strict-https or else what the proxy forwarded.
//!   The modes differ only in what happens to TLS behind the proxy, which the
//!   advertised URLs never see.
//! - Without a proxy, scheme and port are resolved as a pair: forced
//!   https/https-port under strict-https, otherwise both mirror the origin.

use crate::config::schema::{HostnameConfig, ProxyMode};
use crate::hostname::origin::{RequestOrigin, Scheme};

impl ProxyMode {
    /// Whether a reverse proxy fronts the server at all. Controls both the
    /// port policy and whether forwarded headers are trusted.
    pub fn behind_proxy(&self) -> bool {
        !matches!(self, ProxyMode::None)
    }
}

/// Front-end scheme and port for strict hostname-driven resolution.
///
/// `hostname_port` overrides the port under every mode; `None` means the
/// scheme's implicit default.
pub(crate) fn frontend_scheme_and_port(
    config: &HostnameConfig,
    origin: &RequestOrigin,
) -> (Scheme, Option<u16>) {
    let forced_scheme = if config.strict_https {
        Scheme::Https
    } else {
        origin.scheme
    };

    match config.proxy_mode {
        ProxyMode::Edge | ProxyMode::Reencrypt | ProxyMode::Passthrough => {
            (forced_scheme, config.hostname_port)
        }
        ProxyMode::None => {
            let port = if config.strict_https {
                config.https_port
            } else {
                origin.port
            };
            (forced_scheme, Some(config.hostname_port.unwrap_or(port)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(proxy_mode: ProxyMode, strict_https: bool) -> HostnameConfig {
        HostnameConfig {
            hostname: Some("mykeycloak.org".to_string()),
            proxy_mode,
            strict_https,
            ..HostnameConfig::default()
        }
    }

    fn origin() -> RequestOrigin {
        RequestOrigin::new(Scheme::Http, "mykeycloak.org", 8080)
    }

    #[test]
    fn test_every_proxy_mode_omits_port() {
        for mode in [ProxyMode::Edge, ProxyMode::Reencrypt, ProxyMode::Passthrough] {
            let (scheme, port) = frontend_scheme_and_port(&config(mode, true), &origin());
            assert_eq!(scheme, Scheme::Https);
            assert_eq!(port, None, "{mode:?} must omit the port");
        }
    }

    #[test]
    fn test_hostname_port_overrides_under_every_mode() {
        for mode in [
            ProxyMode::None,
            ProxyMode::Edge,
            ProxyMode::Reencrypt,
            ProxyMode::Passthrough,
        ] {
            for strict_https in [true, false] {
                let mut config = config(mode, strict_https);
                config.hostname_port = Some(1234);
                let (_, port) = frontend_scheme_and_port(&config, &origin());
                assert_eq!(port, Some(1234), "{mode:?}, strict_https={strict_https}");
            }
        }
    }

    #[test]
    fn test_proxy_mirrors_forwarded_scheme_without_strict_https() {
        let (scheme, _) = frontend_scheme_and_port(&config(ProxyMode::Edge, false), &origin());
        assert_eq!(scheme, Scheme::Http);
    }

    #[test]
    fn test_no_proxy_pairs_scheme_and_port() {
        // Forced https goes with the configured TLS port.
        let (scheme, port) = frontend_scheme_and_port(&config(ProxyMode::None, true), &origin());
        assert_eq!((scheme, port), (Scheme::Https, Some(8443)));

        // Mirrored scheme goes with the origin port.
        let (scheme, port) = frontend_scheme_and_port(&config(ProxyMode::None, false), &origin());
        assert_eq!((scheme, port), (Scheme::Http, Some(8080)));
    }
}
