//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, plain or TLS listener)
//!     → request.rs (request ID, JSON body decoding)
//!     → user routes (translate to backend calls)
//!     → response.rs (Outcome → status, content type, body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod tls;

pub use request::{JsonBody, MakeRequestUuid, X_REQUEST_ID};
pub use response::Outcome;
pub use server::{GatewayServer, ServerError};
