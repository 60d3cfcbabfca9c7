//! Welcome page and admin console shell.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::http::server::{AppState, ConnectionContext};

/// `GET /` — landing page with the admin console link.
pub async fn welcome_page(
    State(state): State<AppState>,
    Extension(conn): Extension<ConnectionContext>,
    headers: HeaderMap,
) -> Html<String> {
    let (_, endpoints) = state.resolve_endpoints(&conn, &headers);
    let admin_link = endpoints.admin_link();

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Welcome</title></head>\n<body>\n\
         <h1>Welcome</h1>\n\
         <p><a href=\"{admin_link}\">Administration Console</a></p>\n\
         </body>\n</html>\n"
    ))
}

/// `GET /admin/{realm}/console` — console shell with its bootstrap
/// environment. `authUrl` is the resolved admin base without a trailing
/// slash, the form console clients expect.
pub async fn admin_console(
    State(state): State<AppState>,
    Extension(conn): Extension<ConnectionContext>,
    Path(realm): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.realms.contains(&realm) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let (_, endpoints) = state.resolve_endpoints(&conn, &headers);
    let auth_url = endpoints.admin.to_string();
    let auth_url = auth_url.trim_end_matches('/');

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Administration Console</title></head>\n<body>\n\
         <script id=\"environment\" type=\"application/json\">\n\
         {{\n  \"authUrl\": \"{auth_url}\",\n  \"realm\": \"{realm}\",\n  \"clientId\": \"security-admin-console\"\n}}\n\
         </script>\n</body>\n</html>\n"
    ))
    .into_response()
}
