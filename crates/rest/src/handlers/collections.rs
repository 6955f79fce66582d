//! Collection introspection handler.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use tabula_persistence::core::RecordStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler listing the collections (tables) known to storage.
///
/// # HTTP Request
///
/// `GET [base]/api/collections`
///
/// # Response
///
/// ```json
/// {"success": true, "tables": ["accounts", "catalog_items", "purchase_orders"], "count": 3}
/// ```
pub async fn collections_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    debug!("Processing collections request");

    let tables = state.storage().collection_names().await?;
    let count = tables.len();

    Ok(Json(serde_json::json!({
        "success": true,
        "tables": tables,
        "count": count
    }))
    .into_response())
}
