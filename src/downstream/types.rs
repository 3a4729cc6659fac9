//! Downstream request/record types and error definitions.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::downstream::proto::{DataRequest, DataResponse};

/// Ordered list of field paths the downstream should populate.
///
/// Order and duplicates are kept exactly as selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl From<Vec<String>> for FieldMask {
    fn from(paths: Vec<String>) -> Self {
        Self::new(paths)
    }
}

impl From<FieldMask> for prost_types::FieldMask {
    fn from(mask: FieldMask) -> Self {
        prost_types::FieldMask { paths: mask.paths }
    }
}

/// One `GetData` call: entity id plus field mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamRequest {
    pub id: String,
    pub field_mask: FieldMask,
}

impl From<DownstreamRequest> for DataRequest {
    fn from(request: DownstreamRequest) -> Self {
        DataRequest {
            id: request.id,
            field_mask: Some(request.field_mask.into()),
        }
    }
}

/// The entity record returned by the downstream.
///
/// Fields outside the mask carry whatever the downstream sent, usually `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<DataResponse> for Record {
    fn from(response: DataResponse) -> Self {
        Self {
            id: response.id,
            name: response.name,
            description: response.description,
        }
    }
}

/// Errors surfaced by a downstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownstreamError {
    /// The call completed with a non-OK gRPC status.
    #[error("rpc error: code = {code:?} desc = {message}")]
    Rpc { code: tonic::Code, message: String },

    /// The channel could not be set up.
    #[error("transport error: {0}")]
    Transport(String),

    /// No answer within the configured deadline.
    #[error("downstream call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl From<tonic::Status> for DownstreamError {
    fn from(status: tonic::Status) -> Self {
        Self::Rpc {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

impl From<tonic::transport::Error> for DownstreamError {
    fn from(err: tonic::transport::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for downstream operations.
pub type DownstreamResult<T> = Result<T, DownstreamError>;

/// Anything that can answer `GetData`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn get_data(&self, request: DownstreamRequest) -> DownstreamResult<Record>;
}
