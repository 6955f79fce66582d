//! Service index handler.

use axum::{Json, response::IntoResponse};

/// Handler for the service index.
///
/// Returns the service name, version and a map of the list endpoints.
///
/// # HTTP Request
///
/// `GET [base]/`
pub async fn index_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "message": "Tabula API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "accounts": "/api/accounts",
            "items": "/api/items",
            "orders": "/api/orders",
            "collections": "/api/collections"
        }
    }))
}
