//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.
//! The defaults reproduce a gateway with no config file at all: serve
//! `/graphql` on port 8080 and forward to `localhost:50051`.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// GraphQL endpoint and transport settings.
    pub graphql: GraphqlConfig,

    /// Downstream gRPC service settings.
    pub downstream: DownstreamConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where the GraphQL endpoint lives and how query text reaches it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphqlConfig {
    /// Route path of the endpoint.
    pub path: String,

    /// URL parameter carrying the query text (GET, or POST without body).
    pub query_param: String,

    /// JSON body field carrying the query text (POST).
    pub body_field: String,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            path: "/graphql".to_string(),
            query_param: "query".to_string(),
            body_field: "query".to_string(),
        }
    }
}

/// Downstream `DataService` connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// gRPC endpoint URI (e.g., "http://localhost:50051").
    pub endpoint: String,

    /// Connect on first call instead of at startup.
    pub lazy_connect: bool,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Deadline for a single `GetData` call in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50051".to_string(),
            lazy_connect: true,
            connect_timeout_ms: 5_000,
            request_timeout_ms: 10_000,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Inbound size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
