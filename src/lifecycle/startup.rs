//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the schema registry
//! - Open the downstream channel
//! - Assemble executor and HTTP server, then bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::downstream::{DataSource, DownstreamError, GrpcDataSource};
use crate::http::HttpServer;
use crate::query::QueryExecutor;
use crate::schema::{RegistryError, SchemaRegistry};
use crate::translate::RequestTranslator;

/// Errors that stop the process before it serves traffic.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create GraphQL schema: {0}")]
    Schema(#[from] RegistryError),

    #[error("Failed to connect to downstream: {0}")]
    Downstream(#[from] DownstreamError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// A fully assembled gateway, ready to serve.
pub struct Gateway {
    pub server: HttpServer,
    pub listener: TcpListener,
}

/// Build the executor against a given data source.
pub fn build_executor(source: Arc<dyn DataSource>) -> Result<QueryExecutor, StartupError> {
    let registry = Arc::new(SchemaRegistry::new()?);
    tracing::info!(
        entity = registry.entity().name,
        root_field = registry.root().field,
        "GraphQL schema created"
    );
    Ok(QueryExecutor::new(registry, RequestTranslator::new(source)))
}

/// Assemble the gateway from configuration, talking gRPC downstream.
pub async fn build(config: GatewayConfig) -> Result<Gateway, StartupError> {
    let source = GrpcDataSource::connect(&config.downstream).await?;
    tracing::info!(
        endpoint = %source.endpoint(),
        lazy = config.downstream.lazy_connect,
        "Downstream channel ready"
    );
    build_with_source(config, Arc::new(source)).await
}

/// Assemble the gateway with an injected data source.
pub async fn build_with_source(
    config: GatewayConfig,
    source: Arc<dyn DataSource>,
) -> Result<Gateway, StartupError> {
    let executor = build_executor(source)?;

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let server = HttpServer::new(config, executor);
    Ok(Gateway { server, listener })
}
