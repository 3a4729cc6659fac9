//! Downstream integration subsystem.
//!
//! # Data Flow
//! ```text
//! DownstreamRequest { id, field_mask }
//!     → client.rs (GrpcDataSource: deadline, metrics)
//!     → proto.rs (DataRequest over /data.DataService/GetData)
//!     → DataResponse → Record
//! ```
//!
//! # Constraints
//! - One channel per process, shared by every in-flight request
//! - No retries; errors propagate unmodified to the caller

pub mod client;
pub mod proto;
pub mod types;

pub use client::GrpcDataSource;
pub use types::{
    DataSource, DownstreamError, DownstreamRequest, DownstreamResult, FieldMask, Record,
};
