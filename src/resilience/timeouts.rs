//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap downstream calls with a deadline
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - A timed-out call is reported like any other downstream failure

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::downstream::{DownstreamError, DownstreamResult};

/// Run `call`, failing with [`DownstreamError::Timeout`] once `deadline` passes.
pub async fn with_deadline<F, T>(deadline: Duration, call: F) -> DownstreamResult<T>
where
    F: Future<Output = DownstreamResult<T>>,
{
    match timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Downstream deadline exceeded");
            Err(DownstreamError::Timeout(deadline))
        }
    }
}
