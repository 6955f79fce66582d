//! SQLite schema definitions and migrations.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Name of the bookkeeping table, hidden from collection introspection.
pub const SCHEMA_VERSION_TABLE: &str = "schema_version";

fn migration_error(context: &str, e: rusqlite::Error) -> StorageError {
    StorageError::Backend(BackendError::MigrationError {
        message: format!("{}: {}", context, e),
    })
}

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
        tracing::info!(version = SCHEMA_VERSION, "Created SQLite schema");
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create schema_version table", e))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|e| migration_error("Failed to read schema_version", e))?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| migration_error("Failed to clear schema_version", e))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| migration_error("Failed to set schema_version", e))?;

    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            handle TEXT NOT NULL UNIQUE,
            contact_address TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create accounts table", e))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS catalog_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            unit_price TEXT NOT NULL,
            stock_quantity INTEGER NOT NULL DEFAULT 0,
            category TEXT,
            created_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create catalog_items table", e))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS purchase_orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL REFERENCES accounts(id),
            catalog_item_id INTEGER NOT NULL REFERENCES catalog_items(id),
            quantity INTEGER NOT NULL,
            total_price TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| migration_error("Failed to create purchase_orders table", e))?;

    create_indexes(conn)
}

/// Create indexes for the filterable and referencing columns.
fn create_indexes(conn: &Connection) -> StorageResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_catalog_items_category ON catalog_items(category)",
        "CREATE INDEX IF NOT EXISTS idx_purchase_orders_status ON purchase_orders(status)",
        "CREATE INDEX IF NOT EXISTS idx_purchase_orders_account ON purchase_orders(account_id)",
        "CREATE INDEX IF NOT EXISTS idx_purchase_orders_item ON purchase_orders(catalog_item_id)",
    ];

    for index_sql in &indexes {
        conn.execute(index_sql, [])
            .map_err(|e| migration_error("Failed to create index", e))?;
    }

    Ok(())
}
