//! API route configuration.

use axum::{Router, routing::get};
use tabula_persistence::core::RecordStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all Tabula REST API routes.
///
/// # Routes
///
/// ## Service
/// - `GET /` - Service index
/// - `GET /health` - Health check
/// - `GET /api/collections` - Known collection names
///
/// ## Collections
/// - `GET /api/accounts` / `POST /api/accounts`
/// - `GET /api/items` / `POST /api/items`
/// - `GET /api/orders` / `POST /api/orders`
///
/// ## Records
/// - `GET /api/accounts/{id}`
/// - `GET /api/items/{id}`
/// - `GET /api/orders/{id}`
///
/// Unmatched paths answer 404 and unsupported methods 405, both through the
/// error envelope.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RecordStorage + Send + Sync + 'static,
{
    Router::new()
        // Service routes
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/api/collections", get(handlers::collections_handler::<S>))
        // Accounts
        .route(
            "/api/accounts",
            get(handlers::list_accounts_handler::<S>).post(handlers::create_account_handler::<S>),
        )
        .route(
            "/api/accounts/{id}",
            get(handlers::read_account_handler::<S>),
        )
        // Catalog items
        .route(
            "/api/items",
            get(handlers::list_items_handler::<S>).post(handlers::create_item_handler::<S>),
        )
        .route("/api/items/{id}", get(handlers::read_item_handler::<S>))
        // Purchase orders
        .route(
            "/api/orders",
            get(handlers::list_orders_handler::<S>).post(handlers::create_order_handler::<S>),
        )
        .route("/api/orders/{id}", get(handlers::read_order_handler::<S>))
        // Catch-alls
        .fallback(handlers::route_not_found_handler)
        .method_not_allowed_fallback(handlers::method_not_allowed_handler)
        // State
        .with_state(state)
}
