//! SQLite backend implementation.
//!
//! This module provides a SQLite implementation of [`RecordStorage`](crate::core::RecordStorage).
//! It supports both in-memory databases (great for testing) and file-based
//! databases.
//!
//! # Features
//!
//! - In-memory and file-based modes
//! - Auto-increment identities and per-insert transactions
//! - Foreign keys enforced on every pooled connection
//! - Count plus windowed select with an optional equality predicate
//!
//! # Example
//!
//! ```no_run
//! use tabula_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE accounts (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     handle TEXT NOT NULL UNIQUE,
//!     contact_address TEXT NOT NULL UNIQUE,
//!     created_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE catalog_items (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL,
//!     unit_price TEXT NOT NULL,  -- exact decimal text
//!     stock_quantity INTEGER NOT NULL DEFAULT 0,
//!     category TEXT,
//!     created_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE purchase_orders (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     account_id INTEGER NOT NULL REFERENCES accounts(id),
//!     catalog_item_id INTEGER NOT NULL REFERENCES catalog_items(id),
//!     quantity INTEGER NOT NULL,
//!     total_price TEXT NOT NULL,
//!     status TEXT NOT NULL DEFAULT 'pending',
//!     created_at TEXT NOT NULL
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
