//! Catch-all handlers.
//!
//! These answer requests no resource handler claimed, with fixed messages.

use crate::error::RestError;

/// Fallback for unmatched routes (404 `Resource not found`).
pub async fn route_not_found_handler() -> RestError {
    RestError::RouteNotFound
}

/// Fallback for a known path with an unsupported method (405).
pub async fn method_not_allowed_handler() -> RestError {
    RestError::MethodNotAllowed
}

/// Renders a panic caught by the panic layer (500 `Internal server error`).
///
/// The panic payload is logged, never returned.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    use axum::response::IntoResponse;

    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    RestError::Internal.into_response()
}
