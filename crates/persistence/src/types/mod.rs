//! Core types for stored records and collection queries.
//!
//! - [`records`] - The three record shapes and their insert candidates
//! - [`pagination`] - Windowing, equality filters and page metadata

pub mod pagination;
pub mod records;

pub use pagination::{
    DEFAULT_PAGE, DEFAULT_PER_PAGE, EqualityFilter, ListQuery, Page, PageInfo, PageRequest,
};
pub use records::{
    Account, CatalogItem, Collection, DEFAULT_ORDER_STATUS, NewAccount, NewCatalogItem,
    NewPurchaseOrder, PurchaseOrder, Record, creation_timestamp, format_timestamp,
};
