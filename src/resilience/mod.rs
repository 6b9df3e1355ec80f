//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (one deadline per request, enforced on every call)
//!     → On expiry: call future dropped, DeadlineExceeded returned
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - A failed attempt is final: no retries, no circuit breaking

pub mod timeouts;

pub use timeouts::{with_deadline, Deadline};
