//! List query parameter extractor.
//!
//! Extracts `page`, `per_page` and the collection's equality filter from the
//! query string. Extraction never fails: malformed or non-positive values fall
//! back to their defaults and `per_page` is clamped to the configured maximum.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tabula_persistence::types::{Collection, DEFAULT_PAGE, EqualityFilter, ListQuery, PageRequest};

use crate::state::AppState;

/// Axum extractor for list endpoint parameters.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_rest::extractors::ListParams;
///
/// async fn list_handler(params: ListParams) {
///     let query = params.query_for(Collection::CatalogItems);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Effective window.
    page: PageRequest,
    /// Raw query parameters, for filter lookup.
    raw: HashMap<String, String>,
}

impl ListParams {
    /// Builds parameters from raw query pairs.
    pub fn from_query(
        raw: HashMap<String, String>,
        default_per_page: usize,
        max_per_page: usize,
    ) -> Self {
        let default_per_page = u32::try_from(default_per_page).unwrap_or(u32::MAX);
        let max_per_page = u32::try_from(max_per_page).unwrap_or(u32::MAX);

        let page = positive(raw.get("page")).unwrap_or(DEFAULT_PAGE);
        let per_page = positive(raw.get("per_page"))
            .unwrap_or(default_per_page)
            .min(max_per_page);

        Self {
            page: PageRequest::new(page, per_page),
            raw,
        }
    }

    /// Returns the effective window.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Returns the equality filter for `collection`, if the query carries one.
    ///
    /// Only the collection's own filter field is consulted; an empty value is
    /// treated as absent.
    pub fn filter(&self, collection: Collection) -> Option<EqualityFilter> {
        let field = collection.filter_field()?;
        let value = self.raw.get(field)?;
        EqualityFilter::for_collection(collection, value.as_str())
    }

    /// Builds the storage query for `collection`.
    pub fn query_for(&self, collection: Collection) -> ListQuery {
        ListQuery::new(self.page).with_filter(self.filter(collection))
    }
}

/// Parses a positive integer. All-digit values beyond `u32::MAX` saturate so an
/// oversized page lands past the end and an oversized page size is clamped.
fn positive(raw: Option<&String>) -> Option<u32> {
    let raw = raw?.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = raw.parse::<u32>().unwrap_or(u32::MAX);
    (value >= 1).then_some(value)
}

impl<S> FromRequestParts<AppState<S>> for ListParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let raw = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(raw)| raw)
            .unwrap_or_default();

        Ok(ListParams::from_query(
            raw,
            state.default_page_size(),
            state.max_page_size(),
        ))
    }
}
