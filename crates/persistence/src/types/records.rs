//! Record definitions for the three collections.
//!
//! Each stored record carries a store-assigned integer identity and a creation
//! timestamp set at insertion. Records serialize with kebab-case keys, which
//! is the shape returned over the wire.

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Status assigned to purchase orders created without one.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// The collections known to the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Accounts (`accounts` table).
    Accounts,
    /// Catalog items (`catalog_items` table).
    CatalogItems,
    /// Purchase orders (`purchase_orders` table).
    PurchaseOrders,
}

impl Collection {
    /// All collections, in dependency order.
    pub const ALL: [Collection; 3] = [
        Collection::Accounts,
        Collection::CatalogItems,
        Collection::PurchaseOrders,
    ];

    /// Returns the backing table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::CatalogItems => "catalog_items",
            Collection::PurchaseOrders => "purchase_orders",
        }
    }

    /// Returns the singular name used in messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Collection::Accounts => "Account",
            Collection::CatalogItems => "CatalogItem",
            Collection::PurchaseOrders => "PurchaseOrder",
        }
    }

    /// Returns the single field this collection may be equality-filtered on.
    ///
    /// The name doubles as the query parameter and the column name.
    pub fn filter_field(&self) -> Option<&'static str> {
        match self {
            Collection::Accounts => None,
            Collection::CatalogItems => Some("category"),
            Collection::PurchaseOrders => Some("status"),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Common behavior of stored records.
pub trait Record: Serialize {
    /// The collection this record belongs to.
    const COLLECTION: Collection;

    /// Serializes every field into a JSON object.
    fn to_representation(&self) -> Value {
        // Plain field types; serialization into a Value does not fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// An account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    /// Store-assigned identity.
    pub id: i64,
    /// Unique handle.
    pub handle: String,
    /// Unique contact address.
    pub contact_address: String,
    /// Insertion time (UTC).
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogItem {
    /// Store-assigned identity.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Price per unit.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub unit_price: Decimal,
    /// Units in stock.
    pub stock_quantity: i64,
    /// Optional category, the listing filter field.
    pub category: Option<String>,
    /// Insertion time (UTC).
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A purchase order linking an account to a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PurchaseOrder {
    /// Store-assigned identity.
    pub id: i64,
    /// Ordering account.
    pub account_id: i64,
    /// Ordered catalog item.
    pub catalog_item_id: i64,
    /// Units ordered.
    pub quantity: i64,
    /// Total charged for the order.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_price: Decimal,
    /// Order status, the listing filter field.
    pub status: String,
    /// Insertion time (UTC).
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Record for Account {
    const COLLECTION: Collection = Collection::Accounts;
}

impl Record for CatalogItem {
    const COLLECTION: Collection = Collection::CatalogItems;
}

impl Record for PurchaseOrder {
    const COLLECTION: Collection = Collection::PurchaseOrders;
}

/// Insert candidate for an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique handle.
    pub handle: String,
    /// Unique contact address.
    pub contact_address: String,
}

/// Insert candidate for a [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogItem {
    /// Display name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Units in stock.
    pub stock_quantity: i64,
    /// Optional category, the listing filter field.
    pub category: Option<String>,
}

/// Insert candidate for a [`PurchaseOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    /// Ordering account.
    pub account_id: i64,
    /// Ordered catalog item.
    pub catalog_item_id: i64,
    /// Units ordered.
    pub quantity: i64,
    /// Total charged for the order.
    pub total_price: Decimal,
    /// Order status, the listing filter field.
    pub status: String,
}

/// Returns the creation timestamp for a new row.
///
/// Truncated to microseconds so the stored text form round-trips exactly.
pub fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Formats a timestamp as ISO-8601 with microseconds and a `Z` suffix.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}
