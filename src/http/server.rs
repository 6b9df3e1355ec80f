//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the user routes nested under `/user`
//! - Wire up middleware (request ID, tracing, CORS, limits, timeout, metrics)
//! - Bind server to a plain or TLS listener
//! - Drain in-flight requests on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::backend::BackendConnector;
use crate::config::GatewayConfig;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::tls::load_tls_config;
use crate::observability::metrics;
use crate::security::{body_limit_layer, cors_layer};
use crate::user::{user_routes, UserState, USER_PATH_PREFIX};

/// Error type for server startup and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load TLS material: {0}")]
    Tls(#[source] std::io::Error),
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// HTTP front end of the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server; `connector` opens the per-request backend
    /// connections.
    pub fn new(config: GatewayConfig, connector: Arc<dyn BackendConnector>) -> Self {
        let state = UserState::new(connector, Duration::from_millis(config.timeouts.rpc_ms));
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: UserState) -> Router {
        Router::new()
            .nest(USER_PATH_PREFIX, user_routes(state))
            .layer(middleware::from_fn(metrics::track_metrics))
            .layer(body_limit_layer(&config.security))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(cors_layer(&config.cors))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The composed router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Bind the configured address (TLS when configured) and serve until
    /// `shutdown` fires.
    pub async fn serve(self, shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        let bind_address = self.config.listener.bind_address.clone();

        match self.config.listener.tls.clone() {
            Some(tls) => {
                let addr: SocketAddr = bind_address
                    .parse()
                    .map_err(|_| ServerError::InvalidAddress(bind_address.clone()))?;
                let rustls = load_tls_config(&tls).await.map_err(ServerError::Tls)?;
                self.run_tls(addr, rustls, shutdown).await
            }
            None => {
                let listener = TcpListener::bind(&bind_address)
                    .await
                    .map_err(|source| ServerError::Bind {
                        addr: bind_address.clone(),
                        source,
                    })?;
                self.run(listener, shutdown).await
            }
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.user_service.authority(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: axum_server::tls_rustls::RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        tracing::info!(
            address = %addr,
            backend = %self.config.user_service.authority(),
            "HTTPS server starting"
        );

        let handle = axum_server::Handle::new();
        let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
        let signal_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!(grace_secs = grace.as_secs(), "Shutdown signal received, draining connections");
            signal_handle.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

fn request_span(request: &Request) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request),
    )
}
