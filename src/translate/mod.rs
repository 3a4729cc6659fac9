//! Protocol translation subsystem.
//!
//! # Data Flow
//! ```text
//! getData(id) + selected fields
//!     → request.rs (RequestTranslator: DownstreamRequest, DataSource call)
//!     → Record | DownstreamError
//!     → response.rs (ResponseEnvelope {data, errors})
//! ```

pub mod request;
pub mod response;

pub use request::RequestTranslator;
pub use response::ResponseEnvelope;
