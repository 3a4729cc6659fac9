//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, decode query param or JSON body)
//!     → query::QueryExecutor
//!     → response.rs (200 + envelope, or 400 plain text)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, PayloadError, X_REQUEST_ID};
pub use response::INVALID_PAYLOAD;
pub use server::HttpServer;
