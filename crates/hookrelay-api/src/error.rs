//! Request-fatal errors and their HTTP responses.
//!
//! Bodies are fixed plain-text strings that existing callers match on. A
//! malformed payload answers 500 rather than 400 for the same reason.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hookrelay_core::PayloadError;
use hookrelay_delivery::DeliveryError;
use thiserror::Error;

/// Body returned for a payload that could not be decoded.
pub const BAD_REQUEST_BODY: &str = "Bad request.";
/// Body returned when the `auth` segment does not match.
pub const UNAUTHORIZED_BODY: &str = "Unauthorized.";
/// Body returned when the Fleep hook could not be reached.
pub const DELIVERY_FAILED_BODY: &str = "Error calling Fleep Hook";

/// Errors that end a webhook request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload did not decode into a build event.
    #[error("malformed payload: {0}")]
    BadRequest(#[from] PayloadError),

    /// The `auth` path segment did not match the configured secret.
    #[error("unauthorized")]
    Unauthorized,

    /// The Fleep hook could not be reached.
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl ApiError {
    /// Status code and body sent to the caller.
    pub fn status_and_body(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::INTERNAL_SERVER_ERROR, BAD_REQUEST_BODY),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY),
            Self::Delivery(_) => (StatusCode::INTERNAL_SERVER_ERROR, DELIVERY_FAILED_BODY),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status_and_body().into_response()
    }
}
