//! HTTP request handlers.
//!
//! - [`accounts`] - List, read and create accounts
//! - [`items`] - List, read and create catalog items
//! - [`orders`] - List, read and create purchase orders
//! - [`collections`] - Known collection names
//! - [`index`] - Service index
//! - [`health`] - Health check endpoint
//! - [`fallback`] - Unmatched route and method catch-alls

pub mod accounts;
pub mod collections;
pub mod fallback;
pub mod health;
pub mod index;
pub mod items;
pub mod orders;

// Re-export handlers for convenience
pub use accounts::{create_account_handler, list_accounts_handler, read_account_handler};
pub use collections::collections_handler;
pub use fallback::{method_not_allowed_handler, route_not_found_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use items::{create_item_handler, list_items_handler, read_item_handler};
pub use orders::{create_order_handler, list_orders_handler, read_order_handler};
