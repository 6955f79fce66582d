//! The uniform response envelope.
//!
//! Success:
//!
//! ```json
//! {"success": true, "data": {...}}
//! {"success": true, "data": [...], "pagination": {"page": 1, "per_page": 10, "total": 3, "pages": 1}}
//! ```
//!
//! Failure:
//!
//! ```json
//! {"success": false, "error": "Account 9999 not found"}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tabula_persistence::types::{Page, PageInfo, Record};

/// A response body. `data` and `error` are mutually exclusive.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    /// Whether the request succeeded.
    pub success: bool,

    /// The payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Window metadata for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,

    /// Human-readable message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// A successful envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            error: None,
        }
    }

    /// A successful list envelope.
    pub fn paginated(data: T, pagination: PageInfo) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: Some(pagination),
            error: None,
        }
    }
}

impl Envelope<Value> {
    /// A failure envelope carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            error: Some(message.into()),
        }
    }
}

/// Renders a single record with the given status.
pub fn record<R: Record>(status: StatusCode, record: &R) -> Response {
    (status, Json(Envelope::success(record.to_representation()))).into_response()
}

/// Renders one page of records with its metadata.
pub fn page<R: Record>(page: Page<R>) -> Response {
    let info = page.info;
    let data: Vec<Value> = page.items.iter().map(|item| item.to_representation()).collect();
    (StatusCode::OK, Json(Envelope::paginated(data, info))).into_response()
}

/// Renders a failure with the given status.
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(Envelope::failure(message))).into_response()
}
