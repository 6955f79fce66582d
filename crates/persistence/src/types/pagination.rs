//! Pagination and filtering types for collection queries.
//!
//! Pages are 1-based. A query selects an optional single equality filter and a
//! window over the filtered rows; the storage layer answers with the window and
//! the total number of matching rows, from which [`PageInfo`] derives the page
//! count. Pages past the end produce an empty window, never an error.

use serde::Serialize;

use super::records::Collection;

/// Page number used when none (or an unusable one) is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none (or an unusable one) is requested.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// A requested window: 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// A page of 0 becomes [`DEFAULT_PAGE`] and a page size of 0 becomes
    /// [`DEFAULT_PER_PAGE`].
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            per_page: if per_page == 0 {
                DEFAULT_PER_PAGE
            } else {
                per_page
            },
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the number of rows skipped before this window.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Returns the maximum number of rows in this window.
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Exact-match predicate on a collection's single filterable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    column: &'static str,
    value: String,
}

impl EqualityFilter {
    /// Builds the filter for `collection`.
    ///
    /// Returns `None` when the collection has no filterable field or the value
    /// is empty, in which case the query is unfiltered.
    pub fn for_collection(collection: Collection, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            return None;
        }
        collection
            .filter_field()
            .map(|column| Self { column, value })
    }

    /// Returns the filtered column.
    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Returns the value the column must equal.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A collection query: optional filter plus window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// The requested window.
    pub page: PageRequest,
    /// The optional equality filter.
    pub filter: Option<EqualityFilter>,
}

impl ListQuery {
    /// Creates an unfiltered query for the given window.
    pub fn new(page: PageRequest) -> Self {
        Self { page, filter: None }
    }

    /// Adds an equality filter.
    pub fn with_filter(mut self, filter: Option<EqualityFilter>) -> Self {
        self.filter = filter;
        self
    }
}

/// Pagination metadata returned alongside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// The 1-based page number.
    pub page: u32,
    /// The page size.
    pub per_page: u32,
    /// Number of rows matching the filter.
    pub total: u64,
    /// Number of pages: `ceil(total / per_page)`.
    pub pages: u64,
}

impl PageInfo {
    /// Computes metadata for `request` over `total` matching rows.
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page(),
            per_page: request.per_page(),
            total,
            pages: total.div_ceil(request.limit()),
        }
    }
}

/// A window of rows plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Rows in this window, ordered by id ascending.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(items: Vec<T>, info: PageInfo) -> Self {
        Self { items, info }
    }

    /// Maps the rows, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}
