//! Shared utilities for integration testing.
//!
//! Tests drive the router directly with `tower::ServiceExt::oneshot`; no
//! sockets are bound. Each helper builds the app for one listener, tagged
//! with the scheme and port a real connection would carry.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use oxidp::config::schema::{RunMode, ServerConfig};
use oxidp::hostname::origin::Scheme;
use oxidp::http::{ConnectionContext, HttpServer};

/// Production-mode config with the standard test hostname, then per-test
/// adjustments.
pub fn server_config(configure: impl FnOnce(&mut ServerConfig)) -> ServerConfig {
    let mut config = ServerConfig::defaults_for(RunMode::Production);
    config.hostname.hostname = Some("mykeycloak.org".to_string());
    configure(&mut config);
    config
}

/// Router as served by the plain HTTP listener.
pub fn http_app(config: &ServerConfig) -> Router {
    let port = config.hostname.http_port;
    HttpServer::new(config.clone()).router(ConnectionContext {
        scheme: Scheme::Http,
        port,
    })
}

/// Router as served by the TLS listener.
pub fn https_app(config: &ServerConfig) -> Router {
    let port = config.hostname.https_port;
    HttpServer::new(config.clone()).router(ConnectionContext {
        scheme: Scheme::Https,
        port,
    })
}

/// Perform a GET with a Host header and optional extra headers.
pub async fn request(app: &Router, host: &str, path: &str, extra: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder().uri(path).header("host", host);
    for (name, value) in extra {
        builder = builder.header(*name, *value);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Perform a GET and collect the response body as text.
pub async fn get(app: &Router, host: &str, path: &str) -> (StatusCode, String) {
    let response = request(app, host, path, &[]).await;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Fetch the provider metadata for `master` and return the parsed JSON.
pub async fn discovery(app: &Router, host: &str) -> serde_json::Value {
    let (status, body) = get(app, host, "/realms/master/.well-known/openid-configuration").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

/// The advertised authorization endpoint for a request reaching the server
/// with the given Host header.
pub async fn authorization_endpoint(app: &Router, host: &str) -> String {
    discovery(app, host).await["authorization_endpoint"]
        .as_str()
        .unwrap()
        .to_string()
}

/// The advertised token endpoint, analogously.
pub async fn token_endpoint(app: &Router, host: &str) -> String {
    discovery(app, host).await["token_endpoint"]
        .as_str()
        .unwrap()
        .to_string()
}
