//! Request payload validation and coercion.
//!
//! Each `validate_*` function turns an untrusted JSON payload into an insert
//! candidate, or rejects it with the first problem found. Fields are checked
//! in declaration order and nothing is partially applied.
//!
//! A field counts as missing when it is absent, `null`, or an empty string.
//!
//! # Coercion
//!
//! | Kind | Accepted input |
//! |------|----------------|
//! | decimal | JSON number or numeric string, must be `>= 0` |
//! | integer | JSON integer or integral string |
//! | text | JSON string |

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;

use tabula_persistence::types::{
    DEFAULT_ORDER_STATUS, NewAccount, NewCatalogItem, NewPurchaseOrder,
};

/// A rejected request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The body is not a JSON object.
    #[error("request body must be a JSON object")]
    InvalidBody,

    /// A required field is absent, null or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// A field is present but cannot be coerced to its type.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField {
        /// Wire name of the field.
        field: &'static str,
        /// What the field must be.
        reason: &'static str,
    },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

const NON_NEGATIVE_NUMBER: &str = "must be a non-negative number";
const NON_NEGATIVE_INTEGER: &str = "must be a non-negative integer";
const POSITIVE_INTEGER: &str = "must be a positive integer";
const STRING: &str = "must be a string";
const NON_EMPTY_STRING: &str = "must be a non-empty string";

/// Validates an account payload.
pub fn validate_account(payload: &Value) -> ValidationResult<NewAccount> {
    let fields = as_object(payload)?;

    let handle = required_text(fields, "handle")?;
    let contact_address = required_text(fields, "contact-address")?;

    Ok(NewAccount {
        handle,
        contact_address,
    })
}

/// Validates a catalog item payload.
///
/// `stock-quantity` defaults to 0 and `category` to null.
pub fn validate_catalog_item(payload: &Value) -> ValidationResult<NewCatalogItem> {
    let fields = as_object(payload)?;

    let name = required_text(fields, "name")?;

    let unit_price = present(fields, "unit-price")
        .ok_or(ValidationError::MissingField { field: "unit-price" })?;
    let unit_price = decimal(unit_price)
        .filter(|d| !d.is_sign_negative() || d.is_zero())
        .ok_or(ValidationError::InvalidField {
            field: "unit-price",
            reason: NON_NEGATIVE_NUMBER,
        })?;

    let stock_quantity = match optional(fields, "stock-quantity") {
        None => 0,
        Some(value) => integer(value)
            .filter(|n| *n >= 0)
            .ok_or(ValidationError::InvalidField {
                field: "stock-quantity",
                reason: NON_NEGATIVE_INTEGER,
            })?,
    };

    let category = match optional(fields, "category") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(ValidationError::InvalidField {
                field: "category",
                reason: STRING,
            });
        }
    };

    Ok(NewCatalogItem {
        name,
        unit_price,
        stock_quantity,
        category,
    })
}

/// Validates a purchase order payload.
///
/// All four required fields are checked for presence before any of them is
/// coerced. `status` defaults to [`DEFAULT_ORDER_STATUS`].
pub fn validate_purchase_order(payload: &Value) -> ValidationResult<NewPurchaseOrder> {
    let fields = as_object(payload)?;

    for field in ["account-id", "catalog-item-id", "quantity", "total-price"] {
        if present(fields, field).is_none() {
            return Err(ValidationError::MissingField { field });
        }
    }

    let account_id = positive_integer(fields, "account-id")?;
    let catalog_item_id = positive_integer(fields, "catalog-item-id")?;
    let quantity = positive_integer(fields, "quantity")?;

    let total_price = present(fields, "total-price")
        .and_then(decimal)
        .filter(|d| !d.is_sign_negative() || d.is_zero())
        .ok_or(ValidationError::InvalidField {
            field: "total-price",
            reason: NON_NEGATIVE_NUMBER,
        })?;

    let status = match optional(fields, "status") {
        None => DEFAULT_ORDER_STATUS.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(_) => {
            return Err(ValidationError::InvalidField {
                field: "status",
                reason: NON_EMPTY_STRING,
            });
        }
    };

    Ok(NewPurchaseOrder {
        account_id,
        catalog_item_id,
        quantity,
        total_price,
        status,
    })
}

fn as_object(payload: &Value) -> ValidationResult<&Map<String, Value>> {
    payload.as_object().ok_or(ValidationError::InvalidBody)
}

/// Returns the field unless it is absent, null or an empty string.
fn present<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
}

/// Returns the field unless it is absent or null.
fn optional<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    fields.get(field).filter(|v| !v.is_null())
}

fn required_text(fields: &Map<String, Value>, field: &'static str) -> ValidationResult<String> {
    match present(fields, field) {
        None => Err(ValidationError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::InvalidField {
            field,
            reason: STRING,
        }),
    }
}

fn positive_integer(fields: &Map<String, Value>, field: &'static str) -> ValidationResult<i64> {
    present(fields, field)
        .and_then(integer)
        .filter(|n| *n > 0)
        .ok_or(ValidationError::InvalidField {
            field,
            reason: POSITIVE_INTEGER,
        })
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_account_valid() {
        let account = validate_account(&json!({
            "handle": "alice",
            "contact-address": "alice@example.com"
        }))
        .unwrap();
        assert_eq!(account.handle, "alice");
        assert_eq!(account.contact_address, "alice@example.com");
    }

    #[test]
    fn test_account_first_missing_field_wins() {
        let err = validate_account(&json!({})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "handle" });

        let err = validate_account(&json!({"handle": "alice", "contact-address": ""}))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "contact-address"
            }
        );
        assert_eq!(err.to_string(), "missing required field: contact-address");
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(
            validate_account(&json!([1, 2])).unwrap_err(),
            ValidationError::InvalidBody
        );
        assert_eq!(
            validate_purchase_order(&json!("order")).unwrap_err(),
            ValidationError::InvalidBody
        );
    }

    #[test]
    fn test_catalog_item_defaults() {
        let item = validate_catalog_item(&json!({"name": "Widget", "unit-price": 9.99})).unwrap();
        assert_eq!(item.unit_price, dec("9.99"));
        assert_eq!(item.stock_quantity, 0);
        assert_eq!(item.category, None);
    }

    #[test]
    fn test_catalog_item_coerces_numeric_strings() {
        let item = validate_catalog_item(&json!({
            "name": "Widget",
            "unit-price": "12.50",
            "stock-quantity": "7",
            "category": "tools"
        }))
        .unwrap();
        assert_eq!(item.unit_price, dec("12.50"));
        assert_eq!(item.stock_quantity, 7);
        assert_eq!(item.category.as_deref(), Some("tools"));
    }

    #[test]
    fn test_catalog_item_rejections() {
        let err = validate_catalog_item(&json!({"unit-price": 1})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "name" });

        let err = validate_catalog_item(&json!({"name": "Widget"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "unit-price" });

        let err = validate_catalog_item(&json!({"name": "Widget", "unit-price": "cheap"}))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField {
                field: "unit-price",
                ..
            }
        ));

        let err = validate_catalog_item(&json!({"name": "Widget", "unit-price": -1}))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField {
                field: "unit-price",
                ..
            }
        ));

        let err = validate_catalog_item(&json!({
            "name": "Widget",
            "unit-price": 1,
            "stock-quantity": 1.5
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField {
                field: "stock-quantity",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let item = validate_catalog_item(&json!({"name": "Freebie", "unit-price": 0})).unwrap();
        assert!(item.unit_price.is_zero());
    }

    #[test]
    fn test_purchase_order_defaults_status() {
        let order = validate_purchase_order(&json!({
            "account-id": 1,
            "catalog-item-id": 1,
            "quantity": 2,
            "total-price": 19.98
        }))
        .unwrap();
        assert_eq!(order.status, "pending");
        assert_eq!(order.total_price, dec("19.98"));
        assert_eq!(order.quantity, 2);
    }

    #[test]
    fn test_purchase_order_presence_checked_before_types() {
        // quantity is malformed but total-price is missing; presence wins.
        let err = validate_purchase_order(&json!({
            "account-id": 1,
            "catalog-item-id": 1,
            "quantity": "lots"
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "total-price" });
    }

    #[test]
    fn test_purchase_order_typing() {
        let err = validate_purchase_order(&json!({
            "account-id": 0,
            "catalog-item-id": 1,
            "quantity": 2,
            "total-price": 1
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField {
                field: "account-id",
                ..
            }
        ));

        let err = validate_purchase_order(&json!({
            "account-id": 1,
            "catalog-item-id": 1,
            "quantity": 2,
            "total-price": 1,
            "status": ""
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField { field: "status", .. }
        ));
    }
}
