//! Authorization endpoint.
//!
//! Only the entry gate is implemented here: the redirect URI must target the
//! resolved admin or front-end base URL before any login flow starts.
//! Validation runs against the current request's resolution, so with strict
//! hostname resolution disabled the accepted set follows the origin.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use crate::hostname::validator::{RedirectUriError, RedirectUriValidator};
use crate::http::server::{AppState, ConnectionContext};

/// Recognized query parameters of the authorization request.
#[derive(Debug, Deserialize)]
pub struct AuthorizationRequest {
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
    pub response_mode: Option<String>,
    pub response_type: Option<String>,
    pub scope: Option<String>,
    pub nonce: Option<String>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
}

/// `GET /realms/{realm}/protocol/openid-connect/auth`
pub async fn authorization_endpoint(
    State(state): State<AppState>,
    Extension(conn): Extension<ConnectionContext>,
    Path(realm): Path<String>,
    Query(request): Query<AuthorizationRequest>,
    headers: HeaderMap,
) -> Response {
    if !state.realms.contains(&realm) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let (_, endpoints) = state.resolve_endpoints(&conn, &headers);
    let validator = RedirectUriValidator::new(&endpoints);

    let result = match request.redirect_uri.as_deref() {
        Some(uri) => validator.validate(uri),
        None => Err(RedirectUriError::Missing),
    };

    match result {
        Ok(_) => Html(login_page(&realm, request.client_id.as_deref())).into_response(),
        Err(error) => {
            tracing::debug!(
                realm = %realm,
                client_id = request.client_id.as_deref().unwrap_or("unknown"),
                %error,
                "Rejected authorization request"
            );
            (StatusCode::BAD_REQUEST, Html(error_page(&error))).into_response()
        }
    }
}

fn login_page(realm: &str, client_id: Option<&str>) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Sign in to {realm}</title></head>\n\
         <body>\n<h1>Sign in to your account</h1>\n\
         <form id=\"kc-form-login\" method=\"post\" data-client=\"{}\">\n\
         <input name=\"username\" autofocus>\n<input name=\"password\" type=\"password\">\n\
         <input type=\"submit\" value=\"Sign In\">\n</form>\n</body>\n</html>\n",
        client_id.unwrap_or("")
    )
}

fn error_page(error: &RedirectUriError) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>We are sorry...</title></head>\n\
         <body>\n<h1>We are sorry...</h1>\n<p>{error}</p>\n</body>\n</html>\n"
    )
}
