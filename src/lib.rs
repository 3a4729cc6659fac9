//! GraphQL → gRPC gateway library.
//!
//! Accepts `getData(id)` GraphQL queries over HTTP, turns the selected
//! fields into a protobuf field mask, calls `data.DataService/GetData`
//! once, and answers with a `{data, errors}` envelope.

// Translation core
pub mod downstream;
pub mod query;
pub mod schema;
pub mod translate;

// Boundary
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use query::QueryExecutor;
pub use translate::ResponseEnvelope;
