//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all realm-scoped handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Run the plain-HTTP and TLS listeners
//! - Tag each listener with its connection scheme so origin extraction
//!   never guesses how a request arrived
//!
//! # Design Decisions
//! - One router instance per listener; they differ only in the
//!   `ConnectionContext` extension
//! - The frozen config and realm store are shared via Arc in `AppState`

use axum::{routing::get, Extension, Router};
use axum::http::HeaderMap;
use axum_server::tls_rustls::RustlsConfig;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::schema::ServerConfig;
use crate::hostname::origin::{RequestOrigin, Scheme};
use crate::hostname::resolver::{resolve, ResolvedEndpoints};
use crate::http::request::RequestIdLayer;
use crate::http::{authorize, debug, discovery, welcome};
use crate::realm::RealmStore;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Scheme and port of the listener a connection arrived on.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionContext {
    pub scheme: Scheme,
    pub port: u16,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub realms: Arc<RealmStore>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let realms = Arc::new(RealmStore::from_names(&config.realms));
        Self {
            config: Arc::new(config),
            realms,
        }
    }

    /// Extract the request origin and resolve the advertised base URLs.
    pub fn resolve_endpoints(
        &self,
        conn: &ConnectionContext,
        headers: &HeaderMap,
    ) -> (RequestOrigin, ResolvedEndpoints) {
        let hostname = &self.config.hostname;
        let origin = RequestOrigin::from_request(
            conn.scheme,
            conn.port,
            headers,
            hostname.proxy_mode.behind_proxy(),
        );
        let endpoints = resolve(hostname, &origin);
        (origin, endpoints)
    }
}

/// HTTP server for the identity provider.
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new server over a validated, frozen configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Build the router for one listener.
    ///
    /// Public so tests can drive the routes without binding a socket.
    pub fn router(&self, conn: ConnectionContext) -> Router {
        // The diagnostic routes prove CORS headers survive the pipeline.
        let debug_routes = Router::new()
            .route(
                &format!("/realms/{{realm}}/{}", debug::DEBUG_PATH),
                get(debug::debug_settings),
            )
            .route(
                &format!(
                    "/realms/{{realm}}/{}/{}",
                    debug::DEBUG_PATH,
                    debug::CORS_TEST_PATH
                ),
                get(debug::debug_cors),
            )
            .layer(CorsLayer::permissive());

        Router::new()
            .route("/", get(welcome::welcome_page))
            .route(
                "/realms/{realm}/.well-known/openid-configuration",
                get(discovery::provider_configuration),
            )
            .route(
                "/realms/{realm}/protocol/openid-connect/auth",
                get(authorize::authorization_endpoint),
            )
            .route("/admin/{realm}/console", get(welcome::admin_console))
            .merge(debug_routes)
            .with_state(self.state.clone())
            .layer(Extension(conn))
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run all enabled listeners until shutdown.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let config = self.state.config.clone();
        let mut servers = Vec::new();

        if config.listener.http_enabled {
            let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.hostname.http_port));
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(address = %addr, "HTTP listener starting");

            let app = self.router(ConnectionContext {
                scheme: Scheme::Http,
                port: config.hostname.http_port,
            });
            servers.push(tokio::spawn(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown_signal())
                    .await
            }));
        }

        if let (Some(cert), Some(key)) = (
            &config.listener.https_certificate_file,
            &config.listener.https_certificate_key_file,
        ) {
            let tls = RustlsConfig::from_pem_file(cert, key).await?;
            let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.hostname.https_port));
            tracing::info!(address = %addr, "HTTPS listener starting");

            let app = self.router(ConnectionContext {
                scheme: Scheme::Https,
                port: config.hostname.https_port,
            });
            let handle = axum_server::Handle::new();
            let shutdown_handle = handle.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
            });
            servers.push(tokio::spawn(async move {
                axum_server::bind_rustls(addr, tls)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
            }));
        }

        if servers.is_empty() {
            tracing::warn!("No listeners enabled; nothing to serve");
            return Ok(());
        }

        for server in servers {
            server.await.map_err(std::io::Error::other)??;
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
