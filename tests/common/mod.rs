//! Shared utilities for integration and load testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use graphql_grpc_gateway::config::GatewayConfig;
use graphql_grpc_gateway::downstream::{
    DataSource, DownstreamError, DownstreamRequest, DownstreamResult, Record,
};
use graphql_grpc_gateway::lifecycle::{startup, Shutdown};

/// In-memory `DataService` stand-in.
///
/// Populates only the fields named in the mask, like a strict downstream.
#[derive(Default)]
pub struct MockDataSource {
    records: HashMap<String, Record>,
    failure: Option<DownstreamError>,
    delay: Option<Duration>,
    calls: Mutex<Vec<DownstreamRequest>>,
}

#[allow(dead_code)]
impl MockDataSource {
    pub fn with_record(mut self, record: Record) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    pub fn failing(mut self, failure: DownstreamError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<DownstreamRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn get_data(&self, request: DownstreamRequest) -> DownstreamResult<Record> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        let stored = self.records.get(&request.id).ok_or_else(|| DownstreamError::Rpc {
            code: tonic::Code::NotFound,
            message: format!("no record with id {:?}", request.id),
        })?;

        let mut record = Record::default();
        for path in request.field_mask.paths() {
            match path.as_str() {
                "id" => record.id = stored.id.clone(),
                "name" => record.name = stored.name.clone(),
                "description" => record.description = stored.description.clone(),
                _ => {}
            }
        }
        Ok(record)
    }
}

/// The `{id: "42", name: "Widget", description: "A widget"}` record.
#[allow(dead_code)]
pub fn widget() -> Record {
    Record {
        id: "42".into(),
        name: "Widget".into(),
        description: "A widget".into(),
    }
}

/// Start a gateway on an ephemeral port in front of `source`.
///
/// Returns the `/graphql` URL (per `config`) and the shutdown handle.
pub async fn start_gateway(
    mut config: GatewayConfig,
    source: Arc<dyn DataSource>,
) -> (String, Shutdown) {
    config.listener.bind_address = "127.0.0.1:0".into();
    let path = config.graphql.path.clone();

    let gateway = startup::build_with_source(config, source).await.unwrap();
    let addr: SocketAddr = gateway.listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = gateway.server.run(gateway.listener, server_shutdown).await;
    });

    (format!("http://{}{}", addr, path), shutdown)
}

/// A client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
