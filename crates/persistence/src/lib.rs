//! Tabula Persistence Layer
//!
//! This crate defines the records served by the Tabula API (accounts, catalog
//! items and purchase orders), the pagination and filter types used to query
//! them, and the storage trait that backends implement.
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Record shapes, insert candidates, pagination and filters
//! - [`error`] - Error types for all operations
//! - [`core`] - The [`RecordStorage`](core::RecordStorage) trait
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! use tabula_persistence::backends::sqlite::SqliteBackend;
//! use tabula_persistence::core::RecordStorage;
//! use tabula_persistence::types::{NewAccount, ListQuery, PageRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let account = backend
//!     .create_account(NewAccount {
//!         handle: "alice".to_string(),
//!         contact_address: "alice@example.com".to_string(),
//!     })
//!     .await?;
//!
//! let page = backend
//!     .list_accounts(&ListQuery::new(PageRequest::new(1, 10)))
//!     .await?;
//! assert_eq!(page.items[0].id, account.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Pagination
//!
//! Pages are 1-based and ordered by id ascending. The page count is
//! `ceil(total / per_page)`; asking for a page past the end yields an empty
//! window rather than an error.
//!
//! ```
//! use tabula_persistence::types::{PageInfo, PageRequest};
//!
//! let info = PageInfo::new(PageRequest::new(2, 10), 25);
//! assert_eq!(info.pages, 3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

pub use error::{StorageError, StorageResult};
