//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Bind the listener and begin accepting traffic
//! - Wait for a termination signal, then drain
//!
//! # Design Decisions
//! - Expects an already validated config
//! - Fail fast: any startup error is fatal

use std::net::SocketAddr;
use std::sync::Arc;

use crate::backend::{ConnectError, GrpcConnector};
use crate::config::GatewayConfig;
use crate::http::{GatewayServer, ServerError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error(transparent)]
    Backend(#[from] ConnectError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Run the gateway until a termination signal arrives.
pub async fn start(config: GatewayConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let connector = GrpcConnector::new(&config.user_service, &config.timeouts)?;
    tracing::info!(
        backend = %config.user_service.authority(),
        rpc_timeout_ms = config.timeouts.rpc_ms,
        "User service configured"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::forward_signals(shutdown);

    let server = GatewayServer::new(config, Arc::new(connector));
    server.serve(server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
