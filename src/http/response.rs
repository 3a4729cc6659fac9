//! Response handling.
//!
//! # Responsibilities
//! - Write the GraphQL envelope as `200 OK` JSON, errors or not
//! - Write decode failures as `400 Bad Request` plain text
//!
//! # Design Decisions
//! - Application errors travel inside the envelope, never in the status code
//! - The 400 body bypasses the envelope entirely

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::translate::ResponseEnvelope;

pub const INVALID_PAYLOAD: &str = "Invalid request payload";

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// The fixed `400` answer for an undecodable request.
pub fn invalid_payload() -> Response {
    (StatusCode::BAD_REQUEST, INVALID_PAYLOAD).into_response()
}
