//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for Ctrl+C (SIGINT)
//! - Translate it into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A handler that cannot be installed is logged; the process then runs
//!   until killed externally

use crate::lifecycle::Shutdown;

/// Trigger `shutdown` on the first Ctrl+C.
pub async fn shutdown_on_ctrl_c(shutdown: &Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Ctrl+C received, shutting down");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
