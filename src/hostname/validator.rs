//! Redirect URI validation.
//!
//! # Responsibilities
//! - Accept a client redirect URI only when it targets the resolved admin or
//!   front-end base URL
//! - Compare scheme, host (case-insensitive) and effective port
//!
//! # Design Decisions
//! - Validation runs against the current request's resolution, never a
//!   cached one; with strict hostname resolution disabled the accepted set
//!   follows the origin
//! - Rejection is a policy outcome with a client-facing protocol error, not
//!   a fault

use thiserror::Error;
use url::Url;

use crate::hostname::origin::Scheme;
use crate::hostname::resolver::{ResolvedEndpoints, ResolvedUrl};

/// Query parameter checked by the authorization endpoint.
pub const REDIRECT_URI_PARAM: &str = "redirect_uri";

/// Client-facing protocol error for a rejected redirect URI.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedirectUriError {
    #[error("Missing parameter: redirect_uri")]
    Missing,

    #[error("Invalid parameter: redirect_uri")]
    Invalid,
}

/// Validates client-supplied redirect URIs against one request's resolution.
pub struct RedirectUriValidator<'a> {
    endpoints: &'a ResolvedEndpoints,
}

impl<'a> RedirectUriValidator<'a> {
    pub fn new(endpoints: &'a ResolvedEndpoints) -> Self {
        Self { endpoints }
    }

    /// Accept the URI only if its scheme, host and effective port match the
    /// admin base URL or the front-end base URL.
    pub fn validate(&self, redirect_uri: &str) -> Result<Url, RedirectUriError> {
        let url = Url::parse(redirect_uri).map_err(|_| RedirectUriError::Invalid)?;

        let scheme = Scheme::parse(url.scheme()).ok_or(RedirectUriError::Invalid)?;
        let host = url.host_str().ok_or(RedirectUriError::Invalid)?;
        let port = url.port().unwrap_or_else(|| scheme.default_port());

        let accepted = [&self.endpoints.admin, &self.endpoints.frontend]
            .into_iter()
            .any(|base| matches_base(base, scheme, host, port));

        if accepted {
            Ok(url)
        } else {
            tracing::warn!(redirect_uri, "Rejected redirect URI");
            Err(RedirectUriError::Invalid)
        }
    }
}

fn matches_base(base: &ResolvedUrl, scheme: Scheme, host: &str, port: u16) -> bool {
    base.scheme() == scheme
        && base.host().eq_ignore_ascii_case(host)
        && base.effective_port() == port
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HostnameConfig;
    use crate::hostname::origin::RequestOrigin;
    use crate::hostname::resolver::resolve;

    fn endpoints(config: &HostnameConfig) -> ResolvedEndpoints {
        let origin = RequestOrigin::new(Scheme::Https, "mykeycloak.org", 8443);
        resolve(config, &origin)
    }

    fn hostname_config() -> HostnameConfig {
        HostnameConfig {
            hostname: Some("mykeycloak.org".to_string()),
            ..HostnameConfig::default()
        }
    }

    #[test]
    fn test_accepts_frontend_redirect() {
        let endpoints = endpoints(&hostname_config());
        let validator = RedirectUriValidator::new(&endpoints);
        assert!(validator
            .validate("https://mykeycloak.org:8443/admin/master/console")
            .is_ok());
    }

    #[test]
    fn test_rejects_foreign_host() {
        let endpoints = endpoints(&hostname_config());
        let validator = RedirectUriValidator::new(&endpoints);
        assert_eq!(
            validator.validate("https://mykeycloakadmin.127.0.0.1.nip.io:8443/admin/master/console"),
            Err(RedirectUriError::Invalid)
        );
    }

    #[test]
    fn test_accepts_admin_override_host() {
        let mut config = hostname_config();
        config.admin_hostname = Some("mykeycloakadmin.org".to_string());
        let endpoints = endpoints(&config);
        let validator = RedirectUriValidator::new(&endpoints);

        assert!(validator
            .validate("https://mykeycloakadmin.org:8443/admin/master/console")
            .is_ok());
    }

    #[test]
    fn test_accepts_literal_admin_url() {
        let mut config = hostname_config();
        config.admin_url = Some("http://mykeycloakadmin.org:1234".parse().unwrap());
        let endpoints = endpoints(&config);
        let validator = RedirectUriValidator::new(&endpoints);

        assert!(validator
            .validate("http://mykeycloakadmin.org:1234/admin/master/console")
            .is_ok());
        assert_eq!(
            validator.validate("http://mykeycloakadmin.org:9999/admin/master/console"),
            Err(RedirectUriError::Invalid)
        );
    }

    #[test]
    fn test_scheme_and_port_must_match() {
        let endpoints = endpoints(&hostname_config());
        let validator = RedirectUriValidator::new(&endpoints);

        assert_eq!(
            validator.validate("http://mykeycloak.org:8443/console"),
            Err(RedirectUriError::Invalid)
        );
        assert_eq!(
            validator.validate("https://mykeycloak.org:9443/console"),
            Err(RedirectUriError::Invalid)
        );
    }

    #[test]
    fn test_default_port_equivalence() {
        let mut config = hostname_config();
        config.proxy_mode = crate::config::schema::ProxyMode::Edge;
        let endpoints = endpoints(&config);
        let validator = RedirectUriValidator::new(&endpoints);

        // Frontend is https://mykeycloak.org/ with the port omitted.
        assert!(validator.validate("https://mykeycloak.org/console").is_ok());
        assert!(validator.validate("https://mykeycloak.org:443/console").is_ok());
    }

    #[test]
    fn test_host_compare_is_case_insensitive() {
        let endpoints = endpoints(&hostname_config());
        let validator = RedirectUriValidator::new(&endpoints);
        assert!(validator
            .validate("https://MYKEYCLOAK.ORG:8443/console")
            .is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        let endpoints = endpoints(&hostname_config());
        let validator = RedirectUriValidator::new(&endpoints);
        assert_eq!(
            validator.validate("not a url"),
            Err(RedirectUriError::Invalid)
        );
        assert_eq!(
            validator.validate("javascript:alert(1)"),
            Err(RedirectUriError::Invalid)
        );
    }
}
