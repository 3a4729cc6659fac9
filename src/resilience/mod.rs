//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to downstream:
//!     → timeouts.rs (enforce per-call deadline)
//!     → On failure: error surfaces in the response envelope
//! ```
//!
//! # Design Decisions
//! - Every downstream call has a deadline
//! - No retries: a failed call is reported once, as-is

pub mod timeouts;

pub use timeouts::with_deadline;
