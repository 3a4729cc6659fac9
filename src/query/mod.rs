//! Query execution subsystem.
//!
//! # Data Flow
//! ```text
//! GraphqlRequest { query, operationName, variables }
//!     → executor.rs (parse + validate against SchemaRegistry)
//!     → executor.rs (find getData, resolve id)
//!     → selector.rs (selected field names → field mask)
//!     → translate::RequestTranslator → downstream
//!     → translate::response (ResponseEnvelope)
//! ```

pub mod executor;
pub mod request;
pub mod selector;

pub use executor::{ExecutionError, QueryExecutor};
pub use request::GraphqlRequest;
pub use selector::select_fields;
