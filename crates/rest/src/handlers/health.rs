//! Health check endpoint handler.
//!
//! Provides a health check endpoint for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tabula_persistence::core::RecordStorage;
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Pings storage with a trivial query.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server and storage are healthy
/// - `503 Service Unavailable` - Storage cannot serve queries
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: RecordStorage + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();
    let timestamp = chrono::Utc::now().to_rfc3339();

    match state.storage().health_check().await {
        Ok(()) => {
            let body = serde_json::json!({
                "success": true,
                "status": "healthy",
                "backend": backend_name,
                "timestamp": timestamp
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(backend = backend_name, error = %e, "Health check failed");
            let body = serde_json::json!({
                "success": false,
                "status": "unhealthy",
                "backend": backend_name,
                "timestamp": timestamp,
                "error": e.to_string()
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
