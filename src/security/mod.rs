//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight answers, allowed origins)
//!     → limits.rs (request body size)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Reject before any backend work is done
//! - No trust in client input

pub mod cors;
pub mod limits;

pub use cors::cors_layer;
pub use limits::body_limit_layer;
