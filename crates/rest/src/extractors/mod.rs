//! Axum extractors for Tabula requests.
//!
//! - [`ListParams`] - Lenient `page` / `per_page` / filter query parameters
//! - [`JsonPayload`] - Raw JSON request body, handed to validation
//! - [`RecordId`] - Integer id path segment

mod json_payload;
mod list_params;
mod record_id;

pub use json_payload::JsonPayload;
pub use list_params::ListParams;
pub use record_id::RecordId;
