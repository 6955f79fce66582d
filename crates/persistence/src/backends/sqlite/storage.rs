//! RecordStorage implementation for SQLite.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use rust_decimal::Decimal;

use crate::core::RecordStorage;
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{
    Account, CatalogItem, Collection, ListQuery, NewAccount, NewCatalogItem, NewPurchaseOrder,
    Page, PageInfo, PurchaseOrder, Record, creation_timestamp, format_timestamp,
};

use super::SqliteBackend;
use super::schema::SCHEMA_VERSION_TABLE;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Column list and row mapping for a record table.
trait SqliteRecord: Record + Sized {
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl SqliteRecord for Account {
    const COLUMNS: &'static str = "id, handle, contact_address, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Account {
            id: row.get(0)?,
            handle: row.get(1)?,
            contact_address: row.get(2)?,
            created_at: timestamp_column(row, 3)?,
        })
    }
}

impl SqliteRecord for CatalogItem {
    const COLUMNS: &'static str =
        "id, name, unit_price, stock_quantity, category, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CatalogItem {
            id: row.get(0)?,
            name: row.get(1)?,
            unit_price: decimal_column(row, 2)?,
            stock_quantity: row.get(3)?,
            category: row.get(4)?,
            created_at: timestamp_column(row, 5)?,
        })
    }
}

impl SqliteRecord for PurchaseOrder {
    const COLUMNS: &'static str =
        "id, account_id, catalog_item_id, quantity, total_price, status, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PurchaseOrder {
            id: row.get(0)?,
            account_id: row.get(1)?,
            catalog_item_id: row.get(2)?,
            quantity: row.get(3)?,
            total_price: decimal_column(row, 4)?,
            status: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
        })
    }
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads one row by primary key.
fn read_row<T: SqliteRecord>(conn: &Connection, id: i64) -> StorageResult<Option<T>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        T::COLUMNS,
        T::COLLECTION.table_name()
    );

    conn.query_row(&sql, params![id], T::from_row)
        .optional()
        .map_err(|e| {
            internal_error(format!(
                "Failed to read {} {}: {}",
                T::COLLECTION.display_name(),
                id,
                e
            ))
        })
}

/// Counts the filtered rows and reads one window of them, in one transaction.
fn list_rows<T: SqliteRecord>(conn: &mut Connection, query: &ListQuery) -> StorageResult<Page<T>> {
    let collection = T::COLLECTION;
    let table = collection.table_name();

    // Only the collection's own filter column is honoured.
    let filter = query
        .filter
        .as_ref()
        .filter(|f| collection.filter_field() == Some(f.column()));

    let mut params: Vec<Box<dyn ToSql>> = Vec::new();
    let where_clause = match filter {
        Some(f) => {
            params.push(Box::new(f.value().to_string()));
            format!(" WHERE {} = ?1", f.column())
        }
        None => String::new(),
    };

    let tx = conn.transaction()?;

    let total: i64 = tx
        .query_row(
            &format!("SELECT COUNT(*) FROM {}{}", table, where_clause),
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            |row| row.get(0),
        )
        .map_err(|e| internal_error(format!("Failed to count {}: {}", table, e)))?;

    let limit_idx = params.len() + 1;
    let sql = format!(
        "SELECT {} FROM {}{} ORDER BY id ASC LIMIT ?{} OFFSET ?{}",
        T::COLUMNS,
        table,
        where_clause,
        limit_idx,
        limit_idx + 1
    );
    params.push(Box::new(i64::try_from(query.page.limit()).unwrap_or(i64::MAX)));
    params.push(Box::new(i64::try_from(query.page.offset()).unwrap_or(i64::MAX)));

    let items = {
        let mut stmt = tx
            .prepare(&sql)
            .map_err(|e| internal_error(format!("Failed to prepare statement: {}", e)))?;
        stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            T::from_row,
        )
        .map_err(|e| internal_error(format!("Failed to list {}: {}", table, e)))?
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| internal_error(format!("Failed to decode {} row: {}", table, e)))?
    };

    tx.commit()?;

    let total = u64::try_from(total).unwrap_or(0);
    Ok(Page::new(items, PageInfo::new(query.page, total)))
}

/// Returns whether a row with the given id exists in `collection`.
fn row_exists(conn: &Connection, collection: Collection, id: i64) -> StorageResult<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
        collection.table_name()
    );
    let exists: bool = conn.query_row(&sql, params![id], |row| row.get(0))?;
    Ok(exists)
}

#[async_trait]
impl RecordStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn health_check(&self) -> StorageResult<()> {
        let conn = self.get_connection().map_err(|e| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| internal_error(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn collection_names(&self) -> StorageResult<Vec<String>> {
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != ?1
                 ORDER BY name",
            )
            .map_err(|e| internal_error(format!("Failed to prepare statement: {}", e)))?;

        let names = stmt
            .query_map([SCHEMA_VERSION_TABLE], |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to query tables: {}", e)))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(names)
    }

    async fn create_account(&self, account: NewAccount) -> StorageResult<Account> {
        let mut conn = self.get_connection()?;
        let created_at = creation_timestamp();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO accounts (handle, contact_address, created_at) VALUES (?1, ?2, ?3)",
            params![
                account.handle,
                account.contact_address,
                format_timestamp(&created_at)
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(id, "Inserted account");

        Ok(Account {
            id,
            handle: account.handle,
            contact_address: account.contact_address,
            created_at,
        })
    }

    async fn read_account(&self, id: i64) -> StorageResult<Option<Account>> {
        let conn = self.get_connection()?;
        read_row(&conn, id)
    }

    async fn list_accounts(&self, query: &ListQuery) -> StorageResult<Page<Account>> {
        let mut conn = self.get_connection()?;
        list_rows(&mut conn, query)
    }

    async fn create_catalog_item(&self, item: NewCatalogItem) -> StorageResult<CatalogItem> {
        let mut conn = self.get_connection()?;
        let created_at = creation_timestamp();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO catalog_items (name, unit_price, stock_quantity, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.name,
                item.unit_price.to_string(),
                item.stock_quantity,
                item.category,
                format_timestamp(&created_at)
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(id, "Inserted catalog item");

        Ok(CatalogItem {
            id,
            name: item.name,
            unit_price: item.unit_price,
            stock_quantity: item.stock_quantity,
            category: item.category,
            created_at,
        })
    }

    async fn read_catalog_item(&self, id: i64) -> StorageResult<Option<CatalogItem>> {
        let conn = self.get_connection()?;
        read_row(&conn, id)
    }

    async fn list_catalog_items(&self, query: &ListQuery) -> StorageResult<Page<CatalogItem>> {
        let mut conn = self.get_connection()?;
        list_rows(&mut conn, query)
    }

    async fn create_purchase_order(
        &self,
        order: NewPurchaseOrder,
    ) -> StorageResult<PurchaseOrder> {
        let mut conn = self.get_connection()?;
        let created_at = creation_timestamp();

        let tx = conn.transaction()?;

        // References are checked inside the insert transaction; returning early
        // drops `tx`, which rolls it back.
        if !row_exists(&tx, Collection::Accounts, order.account_id)? {
            return Err(StorageError::Resource(ResourceError::ReferenceNotFound {
                field: "account-id".to_string(),
                collection: Collection::Accounts.display_name().to_string(),
                id: order.account_id,
            }));
        }
        if !row_exists(&tx, Collection::CatalogItems, order.catalog_item_id)? {
            return Err(StorageError::Resource(ResourceError::ReferenceNotFound {
                field: "catalog-item-id".to_string(),
                collection: Collection::CatalogItems.display_name().to_string(),
                id: order.catalog_item_id,
            }));
        }

        tx.execute(
            "INSERT INTO purchase_orders
                (account_id, catalog_item_id, quantity, total_price, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                order.account_id,
                order.catalog_item_id,
                order.quantity,
                order.total_price.to_string(),
                order.status,
                format_timestamp(&created_at)
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(
            id,
            account_id = order.account_id,
            catalog_item_id = order.catalog_item_id,
            "Inserted purchase order"
        );

        Ok(PurchaseOrder {
            id,
            account_id: order.account_id,
            catalog_item_id: order.catalog_item_id,
            quantity: order.quantity,
            total_price: order.total_price,
            status: order.status,
            created_at,
        })
    }

    async fn read_purchase_order(&self, id: i64) -> StorageResult<Option<PurchaseOrder>> {
        let conn = self.get_connection()?;
        read_row(&conn, id)
    }

    async fn list_purchase_orders(
        &self,
        query: &ListQuery,
    ) -> StorageResult<Page<PurchaseOrder>> {
        let mut conn = self.get_connection()?;
        list_rows(&mut conn, query)
    }
}
