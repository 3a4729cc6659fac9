//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config <file> (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → handed to lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs (or none)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    DownstreamConfig, GatewayConfig, GraphqlConfig, ListenerConfig, LogFormat,
    ObservabilityConfig,
};
