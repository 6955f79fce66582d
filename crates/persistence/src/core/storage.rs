//! Core record storage trait.
//!
//! This module defines the [`RecordStorage`] trait, the seam between the REST
//! handlers and the relational engine. Every operation is one logical unit of
//! work: a single lookup, a single windowed listing, or a single insert.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{
    Account, CatalogItem, ListQuery, NewAccount, NewCatalogItem, NewPurchaseOrder, Page,
    PurchaseOrder,
};

/// Storage trait for the three record collections.
///
/// # Writes
///
/// Each `create_*` call runs in its own transaction and returns the row as
/// stored, including its assigned id and creation timestamp. A failing insert
/// leaves no partial row behind.
///
/// # Listing
///
/// Each `list_*` call counts the rows matching the query's filter and reads
/// the requested window in id order, both inside one read transaction.
/// Filters on other collections' fields are ignored.
///
/// # Example
///
/// ```ignore
/// use tabula_persistence::core::RecordStorage;
/// use tabula_persistence::types::{ListQuery, NewAccount, PageRequest};
///
/// async fn example<S: RecordStorage>(storage: &S) -> StorageResult<()> {
///     let created = storage
///         .create_account(NewAccount {
///             handle: "alice".to_string(),
///             contact_address: "alice@example.com".to_string(),
///         })
///         .await?;
///
///     let read = storage.read_account(created.id).await?;
///     assert_eq!(read, Some(created));
///
///     let page = storage.list_accounts(&ListQuery::new(PageRequest::default())).await?;
///     assert_eq!(page.info.total, 1);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Verifies the backend can serve queries.
    async fn health_check(&self) -> StorageResult<()>;

    /// Returns the names of the collections (tables) the store knows about.
    async fn collection_names(&self) -> StorageResult<Vec<String>>;

    /// Inserts an account.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - if the handle or contact address is taken,
    ///   or the engine fails
    async fn create_account(&self, account: NewAccount) -> StorageResult<Account>;

    /// Reads an account by id. Returns `Ok(None)` if absent.
    async fn read_account(&self, id: i64) -> StorageResult<Option<Account>>;

    /// Lists a window of accounts.
    async fn list_accounts(&self, query: &ListQuery) -> StorageResult<Page<Account>>;

    /// Inserts a catalog item.
    async fn create_catalog_item(&self, item: NewCatalogItem) -> StorageResult<CatalogItem>;

    /// Reads a catalog item by id. Returns `Ok(None)` if absent.
    async fn read_catalog_item(&self, id: i64) -> StorageResult<Option<CatalogItem>>;

    /// Lists a window of catalog items, optionally filtered by category.
    async fn list_catalog_items(&self, query: &ListQuery) -> StorageResult<Page<CatalogItem>>;

    /// Inserts a purchase order.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(ReferenceNotFound)` - if the account or the
    ///   catalog item does not exist
    /// * `StorageError::Backend` - if the engine fails
    async fn create_purchase_order(&self, order: NewPurchaseOrder)
    -> StorageResult<PurchaseOrder>;

    /// Reads a purchase order by id. Returns `Ok(None)` if absent.
    async fn read_purchase_order(&self, id: i64) -> StorageResult<Option<PurchaseOrder>>;

    /// Lists a window of purchase orders, optionally filtered by status.
    async fn list_purchase_orders(&self, query: &ListQuery)
    -> StorageResult<Page<PurchaseOrder>>;
}
