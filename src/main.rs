//! User gateway (v1)
//!
//! Edge service exposing the user API over REST/JSON and forwarding each
//! call to the user service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌──────────────────────────────────────────────┐
//!     ─────────────────────┼─▶ http server ─▶ /user routes ─▶ translator ─┼──▶ User
//!                          │   (middleware)                  (validate,   │    Service
//!     Client Response      │                                  deadline)   │   (gRPC)
//!     ◀────────────────────┼── Outcome encoding ◀─────────────────────────┼───
//!                          │                                              │
//!                          │  config · observability · security · lifecycle │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use user_gateway::config::{self, ConfigError, Environment, GatewayConfig};
use user_gateway::lifecycle;
use user_gateway::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "user-gateway", version, about = "REST gateway for the user service")]
struct Args {
    /// Explicit config file; overrides environment selection.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Deployment environment (development | production).
    #[arg(short, long, env = "GATEWAY_ENVIRONMENT", default_value = "production")]
    environment: Environment,

    /// Directory searched for the environment's config file.
    #[arg(long, default_value = config::loader::DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,
}

fn load(args: &Args) -> Result<GatewayConfig, ConfigError> {
    match &args.config {
        Some(path) => config::load_config(path),
        None => config::load_for_environment(&args.config_dir, args.environment),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("user-gateway: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %args.environment,
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "user-gateway starting"
    );

    lifecycle::start(config).await?;
    Ok(())
}
