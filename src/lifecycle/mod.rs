//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Schema registry → Downstream channel → Executor → Listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: schema first, then downstream, then listener
//! - Startup failures are fatal and logged once

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{Gateway, StartupError};
