//! Hostname diagnostic endpoint.
//!
//! # Responsibilities
//! - Render the frozen hostname configuration and the current request's
//!   resolution for operators
//! - Answer not-found while disabled or for unknown realms
//!
//! # Design Decisions
//! - Read-only; the rendering is plain text, one configuration property per
//!   line
//! - The nested `test` path exists to show CORS headers surviving the
//!   pipeline: it echoes its own path suffix

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use std::fmt::Write;

use crate::config::schema::{HostnameConfig, RunMode};
use crate::hostname::origin::RequestOrigin;
use crate::hostname::resolver::ResolvedEndpoints;
use crate::http::server::{AppState, ConnectionContext};

/// Path suffix of the diagnostic endpoint under a realm.
pub const DEBUG_PATH: &str = "hostname-debug";

/// Nested path echoing `{CORS_TEST_PATH}-OK` for header checks.
pub const CORS_TEST_PATH: &str = "test";

/// `GET /realms/{realm}/hostname-debug`
pub async fn debug_settings(
    State(state): State<AppState>,
    Extension(conn): Extension<ConnectionContext>,
    Path(realm): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.realms.contains(&realm) || !state.config.hostname.debug_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    let (origin, endpoints) = state.resolve_endpoints(&conn, &headers);
    render_settings(
        &state.config.hostname,
        state.config.run_mode,
        &origin,
        &endpoints,
    )
    .into_response()
}

/// `GET /realms/{realm}/hostname-debug/test`
pub async fn debug_cors(
    State(state): State<AppState>,
    Path(realm): Path<String>,
) -> Response {
    if !state.realms.contains(&realm) || !state.config.hostname.debug_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }
    format!("{CORS_TEST_PATH}-OK").into_response()
}

fn render_settings(
    config: &HostnameConfig,
    run_mode: RunMode,
    origin: &RequestOrigin,
    endpoints: &ResolvedEndpoints,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hostname settings\n");
    let _ = writeln!(out, "Server mode: {}\n", run_mode.label());

    let _ = writeln!(out, "{:<34} Value", "Configuration property");
    property(&mut out, "hostname", &config.hostname);
    property(&mut out, "hostname-url", &config.hostname_url);
    property(&mut out, "hostname-strict", &Some(config.strict));
    property(&mut out, "hostname-strict-https", &Some(config.strict_https));
    property(
        &mut out,
        "hostname-strict-backchannel",
        &Some(config.strict_backchannel),
    );
    property(&mut out, "hostname-port", &config.hostname_port);
    property(&mut out, "hostname-path", &config.path);
    property(&mut out, "hostname-admin", &config.admin_hostname);
    property(&mut out, "hostname-admin-url", &config.admin_url);
    property(&mut out, "proxy", &Some(format!("{:?}", config.proxy_mode).to_lowercase()));
    property(&mut out, "http-port", &Some(config.http_port));
    property(&mut out, "https-port", &Some(config.https_port));
    property(&mut out, "hostname-debug", &Some(config.debug_enabled));

    let _ = writeln!(out);
    let _ = writeln!(out, "Request origin: {origin}");
    let _ = writeln!(out, "Frontend URL: {}", endpoints.frontend);
    let _ = writeln!(out, "Backend URL: {}", endpoints.backend);
    let _ = writeln!(out, "Admin URL: {}", endpoints.admin);
    let _ = writeln!(out, "Admin console: {}", endpoints.admin_link());
    out
}

fn property<T: ToString>(out: &mut String, name: &str, value: &Option<T>) {
    let rendered = value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<unset>".to_string());
    let _ = writeln!(out, "{name:<34} {rendered}");
}
