//! Schema registry subsystem.
//!
//! # Data Flow
//! ```text
//! descriptor.rs (static table: Data entity + getData root field)
//!     → registry.rs (consistency checks, SDL rendering, compilation)
//!     → SchemaRegistry (immutable, shared via Arc)
//!     → query::executor validates every request against it
//! ```

pub mod descriptor;
pub mod registry;

pub use descriptor::{EntityDescriptor, FieldDescriptor, RootOperationDescriptor, ScalarKind};
pub use registry::{RegistryError, SchemaRegistry};
