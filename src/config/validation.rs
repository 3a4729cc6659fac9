//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URIs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tonic::codegen::http::Uri;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}': not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("graphql.path '{0}' must start with '/'")]
    InvalidPath(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("downstream.endpoint '{0}' must be an http:// or https:// URI")]
    InvalidEndpoint(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// Downstream deadline must expire before the whole-request timeout.
    #[error(
        "downstream.request_timeout_ms ({downstream_ms}) must be less than \
         timeouts.request_secs ({request_secs}s)"
    )]
    TimeoutOrder { downstream_ms: u64, request_secs: u64 },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !config.graphql.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(config.graphql.path.clone()));
    }
    if config.graphql.query_param.is_empty() {
        errors.push(ValidationError::Empty("graphql.query_param"));
    }
    if config.graphql.body_field.is_empty() {
        errors.push(ValidationError::Empty("graphql.body_field"));
    }

    let endpoint_ok = config
        .downstream
        .endpoint
        .parse::<Uri>()
        .ok()
        .and_then(|uri| uri.scheme_str().map(|s| s == "http" || s == "https"))
        .unwrap_or(false);
    if !endpoint_ok {
        errors.push(ValidationError::InvalidEndpoint(config.downstream.endpoint.clone()));
    }

    if config.downstream.connect_timeout_ms == 0 {
        errors.push(ValidationError::Zero("downstream.connect_timeout_ms"));
    }
    if config.downstream.request_timeout_ms == 0 {
        errors.push(ValidationError::Zero("downstream.request_timeout_ms"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    let downstream_ms = config.downstream.request_timeout_ms;
    let request_secs = config.timeouts.request_secs;
    if downstream_ms > 0
        && request_secs > 0
        && downstream_ms >= request_secs.saturating_mul(1_000)
    {
        errors.push(ValidationError::TimeoutOrder {
            downstream_ms,
            request_secs,
        });
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero("limits.max_body_size"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
