//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Extract query text, operation name and variables from either transport
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Parameter/field names come from `GraphqlConfig`, so one code path serves
//!   both the URL-parameter and the JSON-body variant
//! - Any decode problem is a `PayloadError`; the handler turns it into a 400

use std::collections::HashMap;

use axum::http::{HeaderValue, Request};
use serde_json::{Map, Value};
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::GraphqlConfig;
use crate::query::GraphqlRequest;

pub const X_REQUEST_ID: &str = "x-request-id";

const OPERATION_NAME: &str = "operationName";
const VARIABLES: &str = "variables";

/// Makes a fresh UUID v4 request ID when the client did not send one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Why an inbound request could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("body is not valid JSON: {0}")]
    Json(String),

    #[error("body must be a JSON object")]
    NotAnObject,

    #[error("field {0} has the wrong type")]
    WrongType(String),
}

/// Build a request from URL parameters.
///
/// A missing query parameter yields empty query text, which fails later as
/// an ordinary GraphQL error.
pub fn from_query_params(
    params: &HashMap<String, String>,
    config: &GraphqlConfig,
) -> Result<GraphqlRequest, PayloadError> {
    let query = params.get(&config.query_param).cloned().unwrap_or_default();
    let operation_name = params
        .get(OPERATION_NAME)
        .filter(|name| !name.is_empty())
        .cloned();

    let variables = match params.get(VARIABLES).filter(|raw| !raw.is_empty()) {
        Some(raw) => {
            let value: Value =
                serde_json::from_str(raw).map_err(|e| PayloadError::Json(e.to_string()))?;
            variables_from(value)?
        }
        None => Map::new(),
    };

    Ok(GraphqlRequest {
        query,
        operation_name,
        variables,
    })
}

/// Build a request from a JSON body `{"<body_field>": "...", "operationName": ..., "variables": ...}`.
pub fn from_json_body(body: &[u8], config: &GraphqlConfig) -> Result<GraphqlRequest, PayloadError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| PayloadError::Json(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(PayloadError::NotAnObject);
    };

    let query = match object.remove(&config.body_field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(query)) => query,
        Some(_) => return Err(PayloadError::WrongType(config.body_field.clone())),
    };

    let operation_name = match object.remove(OPERATION_NAME) {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name),
        Some(_) => return Err(PayloadError::WrongType(OPERATION_NAME.to_string())),
    };

    let variables = match object.remove(VARIABLES) {
        None => Map::new(),
        Some(value) => variables_from(value)?,
    };

    Ok(GraphqlRequest {
        query,
        operation_name,
        variables,
    })
}

fn variables_from(value: Value) -> Result<Map<String, Value>, PayloadError> {
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(PayloadError::WrongType(VARIABLES.to_string())),
    }
}
