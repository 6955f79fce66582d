//! Catalog item handlers.
//!
//! `GET /api/items`, `GET /api/items/{id}`, `POST /api/items`

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
};
use tabula_persistence::core::RecordStorage;
use tabula_persistence::types::Collection;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{JsonPayload, ListParams, RecordId};
use crate::responses::envelope;
use crate::state::AppState;
use crate::validation::validate_catalog_item;

/// Handler for listing catalog items, optionally filtered by `category`.
///
/// # HTTP Request
///
/// `GET [base]/api/items?page=&per_page=&category=`
pub async fn list_items_handler<S>(
    State(state): State<AppState<S>>,
    params: ListParams,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    let query = params.query_for(Collection::CatalogItems);

    debug!(
        page = query.page.page(),
        per_page = query.page.per_page(),
        category = ?query.filter.as_ref().map(|f| f.value()),
        "Processing catalog item list request"
    );

    let page = state.storage().list_catalog_items(&query).await?;
    Ok(envelope::page(page))
}

/// Handler for reading one catalog item.
pub async fn read_item_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    debug!(id, "Processing catalog item read request");

    state
        .storage()
        .read_catalog_item(id)
        .await?
        .map(|item| envelope::record(StatusCode::OK, &item))
        .ok_or_else(|| RestError::NotFound {
            collection: Collection::CatalogItems.display_name().to_string(),
            id,
        })
}

/// Handler for creating a catalog item.
///
/// `stock-quantity` defaults to 0 and `category` to null.
///
/// # Response
///
/// - `201 Created` - The stored item
/// - `400 Bad Request` - Missing or malformed field
pub async fn create_item_handler<S>(
    State(state): State<AppState<S>>,
    JsonPayload(payload): JsonPayload,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    let candidate = validate_catalog_item(&payload)?;

    debug!(name = %candidate.name, "Processing catalog item create request");

    let item = state.storage().create_catalog_item(candidate).await?;
    Ok(envelope::record(StatusCode::CREATED, &item))
}
