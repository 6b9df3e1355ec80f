//! User gateway library: REST/JSON under `/user` translated into calls on
//! the user service.

// Core subsystems
pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod user;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use backend::{BackendConnection, BackendConnector, BackendError, UserBackend};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
