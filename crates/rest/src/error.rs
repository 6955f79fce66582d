//! Error types for the Tabula REST API.
//!
//! Every failure is rendered through the uniform envelope as
//! `{"success": false, "error": "<message>"}`.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Message |
//! |-------|-------------|---------|
//! | Validation | 400 | Specific (`missing required field: handle`) |
//! | NotFound | 404 | Specific (`Account 9999 not found`) |
//! | Storage | 500 | Storage error text |
//! | PayloadTooLarge | 413 | Body limit |
//! | RouteNotFound | 404 | `Resource not found` |
//! | MethodNotAllowed | 405 | `Method not allowed` |
//! | Internal | 500 | `Internal server error` |
//!
//! The catch-all variants never carry detail; per-handler variants do.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tabula_persistence::error::{ResourceError, StorageError};
use tracing::{error, warn};

use crate::responses::envelope;
use crate::validation::ValidationError;

/// Message used for unmatched routes.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Message used for unexpected failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Malformed or incomplete input (HTTP 400).
    Validation {
        /// Error message.
        message: String,
    },

    /// The requested record does not exist (HTTP 404).
    NotFound {
        /// Display name of the collection (e.g., "Account").
        collection: String,
        /// The record ID.
        id: i64,
    },

    /// The storage engine failed (HTTP 500).
    Storage {
        /// Error text reported by the storage layer.
        message: String,
    },

    /// The request body exceeds the configured limit (HTTP 413).
    PayloadTooLarge {
        /// Error message.
        message: String,
    },

    /// No route matched the request (HTTP 404).
    RouteNotFound,

    /// The route exists but not for this method (HTTP 405).
    MethodNotAllowed,

    /// An unexpected failure, such as a handler panic (HTTP 500).
    Internal,
}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } | RestError::RouteNotFound => StatusCode::NOT_FOUND,
            RestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RestError::Storage { .. } | RestError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::Validation { message } => write!(f, "{}", message),
            RestError::NotFound { collection, id } => {
                write!(f, "{} {} not found", collection, id)
            }
            RestError::Storage { message } => write!(f, "{}", message),
            RestError::PayloadTooLarge { message } => write!(f, "{}", message),
            RestError::RouteNotFound => write!(f, "{}", ROUTE_NOT_FOUND_MESSAGE),
            RestError::MethodNotAllowed => write!(f, "Method not allowed"),
            RestError::Internal => write!(f, "{}", INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        envelope::failure(status, self.to_string())
    }
}

// Conversions from validation and storage errors

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::Validation {
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Backend(e) => RestError::Storage {
                message: e.to_string(),
            },
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { collection, id } => RestError::NotFound { collection, id },
            ResourceError::ReferenceNotFound { .. } => RestError::Validation {
                message: err.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::Validation {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
