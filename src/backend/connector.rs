//! Per-request backend connections.
//!
//! # Responsibilities
//! - Open one dedicated connection to the user service per request
//! - Hand it out as a [`BackendConnection`] that closes itself on drop
//! - Track opened/closed/active connections
//!
//! # Design Decisions
//! - No pooling: every request dials and releases its own connection
//! - Dialing is eager, so an unreachable backend fails acquisition
//! - Release is tied to `Drop`, covering every exit path of a handler

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tonic::transport::Endpoint;

use crate::backend::client::UserServiceClient;
use crate::backend::service::{GrpcUserBackend, UserBackend};
use crate::config::{ServiceEndpoint, TimeoutConfig};
use crate::observability::metrics;

/// Failure to obtain a backend connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid backend endpoint '{target}': {reason}")]
    InvalidEndpoint { target: String, reason: String },

    #[error("failed to connect to {target}: {source}")]
    Unreachable {
        target: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// Produces a fresh backend connection for one request.
#[async_trait]
pub trait BackendConnector: Send + Sync {
    async fn acquire(&self) -> Result<BackendConnection, ConnectError>;
}

/// A live backend client scoped to exactly one request.
///
/// Dereferences to the [`UserBackend`] it owns. Dropping it closes the
/// connection exactly once.
pub struct BackendConnection {
    client: Box<dyn UserBackend>,
    target: Arc<str>,
    opened_at: Instant,
}

impl BackendConnection {
    /// Take ownership of a freshly opened client.
    pub fn open(client: Box<dyn UserBackend>, target: Arc<str>) -> Self {
        metrics::record_backend_connection_opened();
        tracing::debug!(backend = %target, "Backend connection opened");
        Self {
            client,
            target,
            opened_at: Instant::now(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl std::fmt::Debug for BackendConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConnection")
            .field("target", &self.target)
            .field("opened_at", &self.opened_at)
            .finish_non_exhaustive()
    }
}

impl Deref for BackendConnection {
    type Target = dyn UserBackend;

    fn deref(&self) -> &Self::Target {
        self.client.as_ref()
    }
}

impl DerefMut for BackendConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.client.as_mut()
    }
}

impl Drop for BackendConnection {
    fn drop(&mut self) {
        self.client.close();
        metrics::record_backend_connection_closed();
        tracing::debug!(
            backend = %self.target(),
            held_ms = self.opened_at.elapsed().as_millis() as u64,
            "Backend connection closed"
        );
    }
}

/// Dials the configured user service over gRPC.
#[derive(Debug, Clone)]
pub struct GrpcConnector {
    endpoint: Endpoint,
    target: Arc<str>,
}

impl GrpcConnector {
    /// Prepare a connector for `service`. The address is checked here, but
    /// no connection is made until [`acquire`](BackendConnector::acquire).
    pub fn new(service: &ServiceEndpoint, timeouts: &TimeoutConfig) -> Result<Self, ConnectError> {
        let target = service.authority();
        if service.host.trim().is_empty() || service.port.trim().is_empty() {
            return Err(ConnectError::InvalidEndpoint {
                target,
                reason: "host and port are required".to_string(),
            });
        }

        let endpoint = Endpoint::from_shared(format!("http://{}", target))
            .map_err(|e| ConnectError::InvalidEndpoint {
                target: target.clone(),
                reason: e.to_string(),
            })?
            .connect_timeout(Duration::from_secs(timeouts.connect_secs));

        Ok(Self {
            endpoint,
            target: target.into(),
        })
    }
}

#[async_trait]
impl BackendConnector for GrpcConnector {
    async fn acquire(&self) -> Result<BackendConnection, ConnectError> {
        let channel = self
            .endpoint
            .connect()
            .await
            .map_err(|source| ConnectError::Unreachable {
                target: self.target.to_string(),
                source,
            })?;

        let backend = GrpcUserBackend::new(UserServiceClient::new(channel));
        Ok(BackendConnection::open(Box::new(backend), self.target.clone()))
    }
}
