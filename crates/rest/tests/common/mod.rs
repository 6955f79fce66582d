//! Shared helpers for REST API integration tests.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use rust_decimal::Decimal;
use serde_json::Value;
use tabula_persistence::backends::sqlite::SqliteBackend;
use tabula_persistence::core::RecordStorage;
use tabula_persistence::error::{BackendError, StorageError, StorageResult};
use tabula_persistence::types::{
    Account, CatalogItem, ListQuery, NewAccount, NewCatalogItem, NewPurchaseOrder, Page,
    PurchaseOrder,
};
use tabula_rest::{ServerConfig, create_app_with_shared_storage};

/// Creates a test server over a fresh in-memory database.
pub fn create_test_server() -> (TestServer, Arc<SqliteBackend>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with a custom configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> (TestServer, Arc<SqliteBackend>) {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let backend = Arc::new(backend);

    let app = create_app_with_shared_storage(Arc::clone(&backend), config);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, backend)
}

/// Engine message reported by [`FailingStorage`].
pub const STORAGE_FAILURE_MESSAGE: &str = "disk I/O error";

/// How [`FailingStorage`] misbehaves on every call.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// Return a backend error carrying [`STORAGE_FAILURE_MESSAGE`].
    Error,
    /// Panic inside the handler.
    Panic,
}

/// Storage whose every operation fails.
pub struct FailingStorage {
    failure: Failure,
}

impl FailingStorage {
    pub fn new(failure: Failure) -> Self {
        Self { failure }
    }

    fn fail<T>(&self) -> StorageResult<T> {
        match self.failure {
            Failure::Error => Err(StorageError::Backend(BackendError::Internal {
                backend_name: "failing".to_string(),
                message: STORAGE_FAILURE_MESSAGE.to_string(),
                source: None,
            })),
            Failure::Panic => panic!("storage handle poisoned"),
        }
    }
}

#[async_trait]
impl RecordStorage for FailingStorage {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.fail()
    }

    async fn collection_names(&self) -> StorageResult<Vec<String>> {
        self.fail()
    }

    async fn create_account(&self, _account: NewAccount) -> StorageResult<Account> {
        self.fail()
    }

    async fn read_account(&self, _id: i64) -> StorageResult<Option<Account>> {
        self.fail()
    }

    async fn list_accounts(&self, _query: &ListQuery) -> StorageResult<Page<Account>> {
        self.fail()
    }

    async fn create_catalog_item(&self, _item: NewCatalogItem) -> StorageResult<CatalogItem> {
        self.fail()
    }

    async fn read_catalog_item(&self, _id: i64) -> StorageResult<Option<CatalogItem>> {
        self.fail()
    }

    async fn list_catalog_items(&self, _query: &ListQuery) -> StorageResult<Page<CatalogItem>> {
        self.fail()
    }

    async fn create_purchase_order(
        &self,
        _order: NewPurchaseOrder,
    ) -> StorageResult<PurchaseOrder> {
        self.fail()
    }

    async fn read_purchase_order(&self, _id: i64) -> StorageResult<Option<PurchaseOrder>> {
        self.fail()
    }

    async fn list_purchase_orders(
        &self,
        _query: &ListQuery,
    ) -> StorageResult<Page<PurchaseOrder>> {
        self.fail()
    }
}

/// Creates a test server over storage that always fails.
pub fn create_failing_server(failure: Failure) -> TestServer {
    let app = create_app_with_shared_storage(
        Arc::new(FailingStorage::new(failure)),
        ServerConfig::for_testing(),
    );
    TestServer::new(app).expect("Failed to create test server")
}

pub fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub async fn seed_account(backend: &SqliteBackend, handle: &str) -> Account {
    backend
        .create_account(NewAccount {
            handle: handle.to_string(),
            contact_address: format!("{}@example.com", handle),
        })
        .await
        .expect("Failed to seed account")
}

pub async fn seed_item(backend: &SqliteBackend, name: &str, category: Option<&str>) -> CatalogItem {
    backend
        .create_catalog_item(NewCatalogItem {
            name: name.to_string(),
            unit_price: decimal("9.99"),
            stock_quantity: 10,
            category: category.map(String::from),
        })
        .await
        .expect("Failed to seed catalog item")
}

pub async fn seed_order(
    backend: &SqliteBackend,
    account_id: i64,
    catalog_item_id: i64,
    status: &str,
) -> PurchaseOrder {
    backend
        .create_purchase_order(NewPurchaseOrder {
            account_id,
            catalog_item_id,
            quantity: 1,
            total_price: decimal("9.99"),
            status: status.to_string(),
        })
        .await
        .expect("Failed to seed purchase order")
}

/// Asserts the failure envelope shape and returns the error message.
pub fn assert_failure(body: &Value) -> String {
    assert_eq!(body["success"], false, "expected failure envelope: {}", body);
    assert!(body.get("data").is_none(), "failure carries data: {}", body);
    body["error"]
        .as_str()
        .expect("failure envelope without error message")
        .to_string()
}

/// Returns the ids in a list envelope's `data`.
pub fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("list envelope without data array")
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}
