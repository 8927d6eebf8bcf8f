//! Prefix-routing HTTP reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                 PREFIX PROXY                   │
//!     Client Request   │  ┌────────┐    ┌──────────┐    ┌───────────┐  │
//!     ─────────────────┼─▶│ server │───▶│ routing  │───▶│  forward  │──┼──▶ Backend
//!                      │  │ (axum) │    │  table   │    │ (reqwest) │  │
//!                      │  └────────┘    └──────────┘    └─────┬─────┘  │
//!     Client Response  │                                      ▼        │
//!     ◀────────────────┼──────────────────────────────── ┌─────────┐   │
//!                      │                                 │  relay  │◀──┼─── Backend
//!                      │                                 └─────────┘   │
//!                      └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use prefix_proxy::config::{
    load_config_with, validation::shadowed_routes, ConfigOverrides, LogFormat, LoggingConfig,
};
use prefix_proxy::lifecycle::{signals::spawn_signal_listener, Shutdown};
use prefix_proxy::observability::init_logging;
use prefix_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "prefix-proxy")]
#[command(about = "Reverse proxy that forwards requests by path prefix", long_about = None)]
struct Cli {
    /// Route file (.json) or full proxy configuration (.toml).
    config: PathBuf,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log format (pretty, compact, json).
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        bind_address: cli.bind,
        log_format: cli.log_format,
    };

    let config = match load_config_with(&cli.config, &overrides) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LoggingConfig::default());
            tracing::error!(path = %cli.config.display(), error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    init_logging(&config.logging);

    tracing::info!("prefix-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        fallback_target = ?config.fallback_target,
        timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    for (earlier, later) in shadowed_routes(&config.routes) {
        tracing::warn!(
            route = later,
            shadowed_by = earlier,
            prefix = %config.routes[later].path_prefix,
            "Route can never match"
        );
    }

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;
    if server.routes().is_empty() {
        tracing::warn!("Route table is empty");
    }
    tracing::info!(
        routes = server.routes().len(),
        no_match = ?server.routes().no_match_policy(),
        "Route table ready"
    );

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
