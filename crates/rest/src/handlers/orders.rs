//! Purchase order handlers.
//!
//! `GET /api/orders`, `GET /api/orders/{id}`, `POST /api/orders`

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
use crate::validation::validate_purchase_order;

/// Handler for listing purchase orders, optionally filtered by `status`.
///
/// # HTTP Request
///
/// `GET [base]/api/orders?page=&per_page=&status=`
pub async fn list_orders_handler<S>(
    State(state): State<AppState<S>>,
    params: ListParams,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    let query = params.query_for(Collection::PurchaseOrders);

    debug!(
        page = query.page.page(),
        per_page = query.page.per_page(),
        status = ?query.filter.as_ref().map(|f| f.value()),
        "Processing purchase order list request"
    );

    let page = state.storage().list_purchase_orders(&query).await?;
    Ok(envelope::page(page))
}

/// Handler for reading one purchase order.
pub async fn read_order_handler<S>(
    State(state): State<AppState<S>>,
    RecordId(id): RecordId,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    debug!(id, "Processing purchase order read request");

    state
        .storage()
        .read_purchase_order(id)
        .await?
        .map(|order| envelope::record(StatusCode::OK, &order))
        .ok_or_else(|| RestError::NotFound {
            collection: Collection::PurchaseOrders.display_name().to_string(),
            id,
        })
}

/// Handler for creating a purchase order.
///
/// # Request Body
///
/// ```json
/// {"account-id": 1, "catalog-item-id": 1, "quantity": 2, "total-price": 19.98}
/// ```
///
/// # Response
///
/// - `201 Created` - The stored order, `status` defaulting to `"pending"`
/// - `400 Bad Request` - Missing or malformed field, or a reference to a
///   missing account or catalog item
/// - `500 Internal Server Error` - Storage failure
pub async fn create_order_handler<S>(
    State(state): State<AppState<S>>,
    JsonPayload(payload): JsonPayload,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    let candidate = validate_purchase_order(&payload)?;

    debug!(
        account_id = candidate.account_id,
        catalog_item_id = candidate.catalog_item_id,
        quantity = candidate.quantity,
        "Processing purchase order create request"
    );

    let order = state.storage().create_purchase_order(candidate).await?;
    Ok(envelope::record(StatusCode::CREATED, &order))
}
