//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config <path>  or  <dir>/gateway[.dev].toml (by environment)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed explicitly to the server and backend connector
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and never mutated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_for_environment, parse_config, ConfigError, Environment};
pub use schema::{
    CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, SecurityConfig,
    ServiceEndpoint, TimeoutConfig, TlsConfig,
};
