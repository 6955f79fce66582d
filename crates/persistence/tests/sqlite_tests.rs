//! SQLite backend integration tests.
//!
//! These tests verify the SQLite backend implementation against the
//! [`RecordStorage`] API.

use std::str::FromStr;

use rust_decimal::Decimal;

use tabula_persistence::backends::sqlite::SqliteBackend;
use tabula_persistence::core::RecordStorage;
use tabula_persistence::error::{ResourceError, StorageError};
use tabula_persistence::types::{
    Collection, EqualityFilter, ListQuery, NewAccount, NewCatalogItem, NewPurchaseOrder,
    PageRequest,
};

fn create_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn new_account(handle: &str) -> NewAccount {
    NewAccount {
        handle: handle.to_string(),
        contact_address: format!("{}@example.com", handle),
    }
}

fn new_item(name: &str, category: Option<&str>) -> NewCatalogItem {
    NewCatalogItem {
        name: name.to_string(),
        unit_price: decimal("9.99"),
        stock_quantity: 5,
        category: category.map(String::from),
    }
}

fn new_order(account_id: i64, catalog_item_id: i64, status: &str) -> NewPurchaseOrder {
    NewPurchaseOrder {
        account_id,
        catalog_item_id,
        quantity: 2,
        total_price: decimal("19.98"),
        status: status.to_string(),
    }
}

async fn count_orders(backend: &SqliteBackend) -> u64 {
    backend
        .list_purchase_orders(&ListQuery::default())
        .await
        .unwrap()
        .info
        .total
}

// ============================================================================
// Create / Read Tests
// ============================================================================

#[tokio::test]
async fn test_create_account_assigns_identity() {
    let backend = create_backend();

    let first = backend.create_account(new_account("alice")).await.unwrap();
    let second = backend.create_account(new_account("bob")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.handle, "alice");
    assert_eq!(first.contact_address, "alice@example.com");
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let backend = create_backend();

    let account = backend.create_account(new_account("alice")).await.unwrap();
    let item = backend
        .create_catalog_item(new_item("Widget", Some("tools")))
        .await
        .unwrap();
    let order = backend
        .create_purchase_order(new_order(account.id, item.id, "pending"))
        .await
        .unwrap();

    assert_eq!(
        backend.read_account(account.id).await.unwrap(),
        Some(account)
    );
    assert_eq!(
        backend.read_catalog_item(item.id).await.unwrap(),
        Some(item)
    );
    assert_eq!(
        backend.read_purchase_order(order.id).await.unwrap(),
        Some(order)
    );
}

#[tokio::test]
async fn test_read_missing_returns_none() {
    let backend = create_backend();

    assert!(backend.read_account(9999).await.unwrap().is_none());
    assert!(backend.read_catalog_item(9999).await.unwrap().is_none());
    assert!(backend.read_purchase_order(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_handle_fails() {
    let backend = create_backend();

    backend.create_account(new_account("alice")).await.unwrap();

    let duplicate = NewAccount {
        handle: "alice".to_string(),
        contact_address: "other@example.com".to_string(),
    };
    let result = backend.create_account(duplicate).await;

    match result {
        Err(StorageError::Backend(e)) => {
            assert!(e.to_string().contains("UNIQUE"), "unexpected error: {}", e);
        }
        other => panic!("Expected backend error, got {:?}", other),
    }

    // Nothing was written by the failed insert.
    let page = backend.list_accounts(&ListQuery::default()).await.unwrap();
    assert_eq!(page.info.total, 1);
}

#[tokio::test]
async fn test_duplicate_contact_address_fails() {
    let backend = create_backend();

    backend.create_account(new_account("alice")).await.unwrap();

    let duplicate = NewAccount {
        handle: "alice2".to_string(),
        contact_address: "alice@example.com".to_string(),
    };
    assert!(backend.create_account(duplicate).await.is_err());
}

// ============================================================================
// Referential Integrity Tests
// ============================================================================

#[tokio::test]
async fn test_order_with_missing_account_is_rejected() {
    let backend = create_backend();
    let item = backend.create_catalog_item(new_item("Widget", None)).await.unwrap();

    let result = backend
        .create_purchase_order(new_order(42, item.id, "pending"))
        .await;

    assert!(matches!(
        result,
        Err(StorageError::Resource(ResourceError::ReferenceNotFound { id: 42, .. }))
    ));
    assert_eq!(count_orders(&backend).await, 0);
}

#[tokio::test]
async fn test_order_with_missing_item_is_rejected() {
    let backend = create_backend();
    let account = backend.create_account(new_account("alice")).await.unwrap();

    let result = backend
        .create_purchase_order(new_order(account.id, 7, "pending"))
        .await;

    match result {
        Err(StorageError::Resource(ResourceError::ReferenceNotFound { field, id, .. })) => {
            assert_eq!(field, "catalog-item-id");
            assert_eq!(id, 7);
        }
        other => panic!("Expected ReferenceNotFound, got {:?}", other),
    }
    assert_eq!(count_orders(&backend).await, 0);
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_pages_cover_every_row_once() {
    let backend = create_backend();
    for i in 0..23 {
        backend
            .create_account(new_account(&format!("user{}", i)))
            .await
            .unwrap();
    }

    let per_page = 5;
    let first = backend
        .list_accounts(&ListQuery::new(PageRequest::new(1, per_page)))
        .await
        .unwrap();
    assert_eq!(first.info.total, 23);
    assert_eq!(first.info.pages, 5);

    let mut seen = Vec::new();
    for page in 1..=first.info.pages as u32 {
        let window = backend
            .list_accounts(&ListQuery::new(PageRequest::new(page, per_page)))
            .await
            .unwrap();
        seen.extend(window.items.into_iter().map(|a| a.id));
    }

    assert_eq!(seen.len() as u64, first.info.total);
    assert_eq!(seen, (1..=23).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let backend = create_backend();
    backend.create_account(new_account("alice")).await.unwrap();

    let page = backend
        .list_accounts(&ListQuery::new(PageRequest::new(50, 10)))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.info.total, 1);
    assert_eq!(page.info.pages, 1);
    assert_eq!(page.info.page, 50);
}

#[tokio::test]
async fn test_empty_collection() {
    let backend = create_backend();

    let page = backend
        .list_catalog_items(&ListQuery::default())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.info.total, 0);
    assert_eq!(page.info.pages, 0);
}

// ============================================================================
// Filter Tests
// ============================================================================

#[tokio::test]
async fn test_category_filter_is_exact() {
    let backend = create_backend();
    backend.create_catalog_item(new_item("Hammer", Some("tools"))).await.unwrap();
    backend.create_catalog_item(new_item("Wrench", Some("tools"))).await.unwrap();
    backend.create_catalog_item(new_item("Apple", Some("food"))).await.unwrap();
    backend.create_catalog_item(new_item("Toolbox", Some("Tools"))).await.unwrap();
    backend.create_catalog_item(new_item("Mystery", None)).await.unwrap();

    let query = ListQuery::new(PageRequest::default())
        .with_filter(EqualityFilter::for_collection(Collection::CatalogItems, "tools"));
    let page = backend.list_catalog_items(&query).await.unwrap();

    assert_eq!(page.info.total, 2);
    assert!(
        page.items
            .iter()
            .all(|i| i.category.as_deref() == Some("tools"))
    );

    let unfiltered = backend
        .list_catalog_items(&ListQuery::default())
        .await
        .unwrap();
    assert_eq!(unfiltered.info.total, 5);
}

#[tokio::test]
async fn test_status_filter_with_pagination() {
    let backend = create_backend();
    let account = backend.create_account(new_account("alice")).await.unwrap();
    let item = backend.create_catalog_item(new_item("Widget", None)).await.unwrap();

    for i in 0..7 {
        let status = if i % 2 == 0 { "pending" } else { "shipped" };
        backend
            .create_purchase_order(new_order(account.id, item.id, status))
            .await
            .unwrap();
    }

    let query = ListQuery::new(PageRequest::new(2, 3))
        .with_filter(EqualityFilter::for_collection(Collection::PurchaseOrders, "pending"));
    let page = backend.list_purchase_orders(&query).await.unwrap();

    assert_eq!(page.info.total, 4);
    assert_eq!(page.info.pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].status, "pending");
}

// ============================================================================
// Introspection Tests
// ============================================================================

#[tokio::test]
async fn test_collection_names() {
    let backend = create_backend();
    let names = backend.collection_names().await.unwrap();
    assert_eq!(names.len(), Collection::ALL.len());
    for collection in Collection::ALL {
        assert!(names.contains(&collection.table_name().to_string()));
    }
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tabula.db");

    {
        let backend = SqliteBackend::open(&path).unwrap();
        backend.init_schema().unwrap();
        backend.create_account(new_account("alice")).await.unwrap();
    }

    let backend = SqliteBackend::open(&path).unwrap();
    backend.init_schema().unwrap();
    let account = backend.read_account(1).await.unwrap().unwrap();
    assert_eq!(account.handle, "alice");
}
