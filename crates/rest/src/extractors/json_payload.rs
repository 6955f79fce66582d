//! JSON body extractor.
//!
//! Reads the request body as an arbitrary JSON value. Shape checks are left
//! to [`crate::validation`] so every rejection goes through the same envelope.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::Value;

use crate::error::RestError;
use crate::validation::ValidationError;

/// Axum extractor for a raw JSON payload.
///
/// The `Content-Type` header is not enforced.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_rest::extractors::JsonPayload;
///
/// async fn create_handler(JsonPayload(payload): JsonPayload) {
///     let candidate = validate_account(&payload)?;
/// }
/// ```
#[derive(Debug)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RestError::PayloadTooLarge {
                    message: e.body_text(),
                }
            } else {
                RestError::Validation {
                    message: e.body_text(),
                }
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::InvalidBody.into());
        }

        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(JsonPayload(value))
    }
}
