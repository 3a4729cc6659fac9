//! gRPC client for the downstream `DataService`.
//!
//! # Responsibilities
//! - Open the single long-lived channel to the downstream endpoint
//! - Issue `GetData` calls with a per-call deadline
//! - Record call latency and outcome

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};

use crate::config::DownstreamConfig;
use crate::downstream::proto::{DataRequest, DataServiceClient};
use crate::downstream::types::{
    DataSource, DownstreamError, DownstreamRequest, DownstreamResult, Record,
};
use crate::observability::metrics;
use crate::resilience::with_deadline;

/// `DataSource` backed by a tonic channel.
///
/// Cloning is cheap; all clones share the same underlying connection.
#[derive(Debug, Clone)]
pub struct GrpcDataSource {
    client: DataServiceClient,
    endpoint: String,
    timeout_duration: Duration,
}

impl GrpcDataSource {
    /// Create the client.
    ///
    /// With `lazy_connect` the channel is only dialled on the first call;
    /// otherwise the connection is established here and a failure is returned.
    pub async fn connect(config: &DownstreamConfig) -> DownstreamResult<Self> {
        let endpoint = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));

        let channel = if config.lazy_connect {
            endpoint.connect_lazy()
        } else {
            endpoint.connect().await?
        };

        Ok(Self::from_channel(
            channel,
            config.endpoint.clone(),
            Duration::from_millis(config.request_timeout_ms),
        ))
    }

    /// Wrap an existing channel.
    pub fn from_channel(channel: Channel, endpoint: String, timeout_duration: Duration) -> Self {
        Self {
            client: DataServiceClient::new(channel),
            endpoint,
            timeout_duration,
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DataSource for GrpcDataSource {
    async fn get_data(&self, request: DownstreamRequest) -> DownstreamResult<Record> {
        let start = Instant::now();
        let mut client = self.client.clone();
        let wire = DataRequest::from(request);

        tracing::debug!(
            id = %wire.id,
            paths = ?wire.field_mask.as_ref().map(|m| &m.paths),
            "Calling GetData"
        );

        let result = with_deadline(self.timeout_duration, async move {
            let response = client.get_data(wire).await?;
            Ok::<_, DownstreamError>(Record::from(response.into_inner()))
        })
        .await;

        metrics::record_downstream_call(result.is_ok(), start);
        if let Err(e) = &result {
            tracing::error!(endpoint = %self.endpoint, error = %e, "GetData failed");
        }
        result
    }
}
