//! Response encoding: downstream outcome → GraphQL response envelope.
//!
//! # Responsibilities
//! - Success: `data` is the record, `errors` is empty
//! - Failure: `data` is null, one error string per failure
//! - Log every envelope that carries errors
//!
//! # Design Decisions
//! - `errors` is always serialized, even when empty
//! - Error text is the error's `Display` output, nothing added

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::downstream::Record;

/// The `{data, errors}` body returned for every GraphQL request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub data: Option<Record>,
    pub errors: Vec<String>,
}

impl ResponseEnvelope {
    /// No data and no errors (nothing was resolved).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Shape the outcome of a downstream call.
pub fn encode<E: Display>(result: Result<Record, E>) -> ResponseEnvelope {
    match result {
        Ok(record) => ResponseEnvelope {
            data: Some(record),
            errors: Vec::new(),
        },
        Err(e) => reject([e.to_string()]),
    }
}

/// Shape a failure that happened before (or instead of) the downstream call.
pub fn reject<I>(errors: I) -> ResponseEnvelope
where
    I: IntoIterator<Item = String>,
{
    let envelope = ResponseEnvelope {
        data: None,
        errors: errors.into_iter().collect(),
    };
    if !envelope.errors.is_empty() {
        tracing::warn!(errors = ?envelope.errors, "Failed to execute query");
    }
    envelope
}
