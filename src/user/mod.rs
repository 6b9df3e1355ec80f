//! User API subsystem.
//!
//! # Data Flow
//! ```text
//! /user/<route>
//!     → routes.rs (method + path dispatch, 405 fallback)
//!     → handlers.rs (decode → validate → acquire → invoke)
//!     → dto.rs (request/response bodies, validators)
//!     → http::response (Outcome encoding)
//! ```
//!
//! # Design Decisions
//! - One backend connection per request, acquired after validation
//! - Only login distinguishes backend failures (403 vs 401); every other
//!   route reports backend failures as 500

pub mod dto;
pub mod handlers;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{BackendConnection, BackendConnector};
use crate::error::GatewayError;
use crate::resilience::Deadline;

pub use routes::{user_routes, UserRoute, USER_PATH_PREFIX};

/// Shared, read-only state of the user routes.
#[derive(Clone)]
pub struct UserState {
    connector: Arc<dyn BackendConnector>,
    rpc_timeout: Duration,
}

impl UserState {
    pub fn new(connector: Arc<dyn BackendConnector>, rpc_timeout: Duration) -> Self {
        Self {
            connector,
            rpc_timeout,
        }
    }

    /// Open this request's backend connection.
    async fn connect(&self) -> Result<BackendConnection, GatewayError> {
        Ok(self.connector.acquire().await?)
    }

    /// Deadline for the backend calls of one request.
    fn deadline(&self) -> Deadline {
        Deadline::after(self.rpc_timeout)
    }
}
