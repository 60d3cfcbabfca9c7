//! OIDC provider discovery metadata.
//!
//! The endpoints advertised here are where the resolved base URLs become
//! externally visible: browser-facing entries build on the front-end URL,
//! server-to-server entries on the back-end URL.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::hostname::resolver::ResolvedEndpoints;
use crate::http::server::{AppState, ConnectionContext};

/// OpenID Provider Metadata, reduced to what this server advertises.
#[derive(Debug, Serialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub jwks_uri: String,
    pub response_types_supported: Vec<&'static str>,
    pub subject_types_supported: Vec<&'static str>,
    pub id_token_signing_alg_values_supported: Vec<&'static str>,
    pub grant_types_supported: Vec<&'static str>,
    pub code_challenge_methods_supported: Vec<&'static str>,
}

impl ProviderMetadata {
    pub fn new(endpoints: &ResolvedEndpoints, realm: &str) -> Self {
        Self {
            issuer: endpoints.frontend.join(&format!("realms/{realm}")),
            authorization_endpoint: endpoints
                .frontend
                .join(&format!("realms/{realm}/protocol/openid-connect/auth")),
            token_endpoint: endpoints
                .backend
                .join(&format!("realms/{realm}/protocol/openid-connect/token")),
            jwks_uri: endpoints
                .backend
                .join(&format!("realms/{realm}/protocol/openid-connect/certs")),
            response_types_supported: vec!["code", "none", "id_token", "token id_token"],
            subject_types_supported: vec!["public"],
            id_token_signing_alg_values_supported: vec!["RS256", "ES256", "PS256"],
            grant_types_supported: vec![
                "authorization_code",
                "refresh_token",
                "client_credentials",
            ],
            code_challenge_methods_supported: vec!["plain", "S256"],
        }
    }
}

/// `GET /realms/{realm}/.well-known/openid-configuration`
pub async fn provider_configuration(
    State(state): State<AppState>,
    Extension(conn): Extension<ConnectionContext>,
    Path(realm): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.realms.contains(&realm) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let (_, endpoints) = state.resolve_endpoints(&conn, &headers);
    Json(ProviderMetadata::new(&endpoints, &realm)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HostnameConfig;
    use crate::hostname::origin::{RequestOrigin, Scheme};
    use crate::hostname::resolver::resolve;

    #[test]
    fn test_endpoints_split_between_frontend_and_backend() {
        let config = HostnameConfig {
            hostname: Some("mykeycloak.org".to_string()),
            ..HostnameConfig::default()
        };
        let origin = RequestOrigin::new(Scheme::Http, "localhost", 8080);
        let metadata = ProviderMetadata::new(&resolve(&config, &origin), "master");

        assert_eq!(metadata.issuer, "https://mykeycloak.org:8443/realms/master");
        assert_eq!(
            metadata.authorization_endpoint,
            "https://mykeycloak.org:8443/realms/master/protocol/openid-connect/auth"
        );
        assert_eq!(
            metadata.token_endpoint,
            "http://localhost:8080/realms/master/protocol/openid-connect/token"
        );
        assert_eq!(
            metadata.jwks_uri,
            "http://localhost:8080/realms/master/protocol/openid-connect/certs"
        );
    }
}
