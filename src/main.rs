//! GraphQL → gRPC gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌───────────────────────────────────────────────────┐
//!                         │                     GATEWAY                        │
//!   GET/POST /graphql     │  ┌────────┐   ┌──────────┐   ┌────────────────┐   │
//!   ──────────────────────┼─▶│  http  │──▶│  query   │──▶│ query::selector│   │
//!                         │  │ server │   │ executor │   │  (field mask)  │   │
//!                         │  └────────┘   └────┬─────┘   └───────┬────────┘   │
//!                         │                    │ validates       │            │
//!                         │                    ▼                 ▼            │
//!                         │             ┌────────────┐   ┌──────────────┐     │
//!                         │             │   schema   │   │  translate   │     │  GetData(id, mask)
//!                         │             │  registry  │   │   request    │─────┼──────────────────▶
//!                         │             └────────────┘   └──────┬───────┘     │    downstream
//!   200 {data, errors}    │  ┌────────┐                  ┌──────▼───────┐     │
//!   ◀─────────────────────┼──│  http  │◀─────────────────│  translate   │◀────┼──────────────────
//!                         │  │response│                  │   response   │     │  Record | Status
//!                         │  └────────┘                  └──────────────┘     │
//!                         └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use graphql_grpc_gateway::config::{resolve_config, ObservabilityConfig};
use graphql_grpc_gateway::lifecycle::{signals, startup, Shutdown};
use graphql_grpc_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "graphql-grpc-gateway")]
#[command(about = "GraphQL gateway in front of a gRPC DataService", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    tracing::info!("graphql-grpc-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        downstream = %config.downstream.endpoint,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let gateway = match startup::build(config).await {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move { signals::shutdown_on_ctrl_c(&signal_shutdown).await });

    if let Err(e) = gateway.server.run(gateway.listener, server_shutdown).await {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
