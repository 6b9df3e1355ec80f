//! Backend user service subsystem.
//!
//! # Data Flow
//! ```text
//! Route translator
//!     → connector.rs (dial user service, wrap in BackendConnection)
//!     → service.rs (UserBackend operation with deadline)
//!     → client.rs (tonic unary call, proto.rs messages)
//!     → user service
//! Handler returns → BackendConnection dropped → connection closed
//! ```
//!
//! # Design Decisions
//! - One connection per request; never shared, never held past the request
//! - The transport sits behind the `UserBackend` trait so translators
//!   can be exercised without a network

pub mod client;
pub mod connector;
pub mod proto;
pub mod service;

pub use connector::{BackendConnection, BackendConnector, ConnectError, GrpcConnector};
pub use service::{BackendError, GrpcUserBackend, UserBackend};
