//! Page Protocol
//!
//! Every list endpoint takes a page number, a page size and an optional search
//! term, and answers with the matching slice plus metadata describing the whole
//! result set. A page past the end is a valid, empty answer.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// First page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the service will honour.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalised list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,

    /// Page size, within `1..=MAX_PAGE_SIZE`
    pub limit: u32,

    /// Case-insensitive name filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl PageRequest {
    /// Build a request, clamping `page` and `limit` into range.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            search: None,
        }
    }

    /// Build a request from raw query parameters.
    ///
    /// Missing values fall back to the defaults, values below one are raised to
    /// one, and oversized limits are capped at [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn from_query(page: Option<i64>, limit: Option<i64>, search: Option<String>) -> Self {
        let page = page.map_or(DEFAULT_PAGE, |page| {
            u32::try_from(page.max(1)).unwrap_or(u32::MAX)
        });

        let limit = limit.map_or(DEFAULT_PAGE_SIZE, |limit| {
            u32::try_from(limit.clamp(1, i64::from(MAX_PAGE_SIZE))).unwrap_or(MAX_PAGE_SIZE)
        });

        Self::new(page, limit).with_search(search)
    }

    /// Attach a search term. Blank terms are dropped.
    #[must_use]
    pub fn with_search<S: Into<String>>(mut self, search: Option<S>) -> Self {
        self.search = search
            .map(Into::into)
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());

        self
    }

    /// Same request for a different page.
    #[must_use]
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// The search term, if any.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Number of matching rows preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Whether `name` passes the search filter.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.search_term()
            .is_none_or(|term| name.to_lowercase().contains(&term.to_lowercase()))
    }
}

/// Number of pages needed for `total` rows, never less than one.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1))).max(1)
}

/// Result set metadata returned alongside every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Requested page
    pub page: u32,

    /// Effective page size
    pub page_size: u32,

    /// Rows matching the filter across all pages
    pub total: u64,

    /// `max(1, ceil(total / page_size))`
    pub total_pages: u64,
}

impl Pagination {
    /// Metadata for `request` over `total` matching rows.
    #[must_use]
    pub fn new(request: &PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            page_size: request.limit,
            total,
            total_pages: total_pages(total, request.limit),
        }
    }

    /// Whether the requested page lies past the last page.
    #[must_use]
    pub fn is_beyond_range(&self) -> bool {
        u64::from(self.page) > self.total_pages
    }

    /// Whether another page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in primary key order
    pub data: Vec<T>,

    /// Result set metadata
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap already-sliced `data`.
    #[must_use]
    pub fn new(data: Vec<T>, request: &PageRequest, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination::new(request, total),
        }
    }

    /// An empty result set.
    #[must_use]
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Convert every item, keeping the metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Convert every item fallibly, keeping the metadata.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error.
    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, f: F) -> Result<Page<U>, E> {
        Ok(Page {
            data: self.data.into_iter().map(f).collect::<Result<_, _>>()?,
            pagination: self.pagination,
        })
    }

    /// Items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the request asked for a page past the last one.
    #[must_use]
    pub fn is_beyond_range(&self) -> bool {
        self.pagination.is_beyond_range()
    }
}

/// Apply the page protocol to an in-memory list.
///
/// Items are filtered by `request.search`, ordered by primary key and sliced.
#[must_use]
pub fn paginate<T: Entity>(items: impl IntoIterator<Item = T>, request: &PageRequest) -> Page<T> {
    let mut matching: Vec<T> = items
        .into_iter()
        .filter(|item| request.matches(item.display_name()))
        .collect();

    matching.sort_by_key(T::id);

    let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
    let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(request.limit).unwrap_or(usize::MAX);

    let data = matching.into_iter().skip(skip).take(take).collect();

    Page::new(data, request, total)
}
