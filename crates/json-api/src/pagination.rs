//! Wire shapes shared by the paginated index handlers.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

use quarry::pagination::{PageRequest, Pagination};

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    /// Requested page, 1-based
    pub page: u32,

    /// Items per page
    pub page_size: u32,

    /// Matching items across all pages
    pub total: u64,

    /// Page count, never below 1
    pub total_pages: u64,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total: pagination.total,
            total_pages: pagination.total_pages,
        }
    }
}

/// Build a normalized page request from the optional `page`, `limit` and
/// `search` query parameters.
pub(crate) fn page_request(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    search: QueryParam<String, false>,
) -> PageRequest {
    PageRequest::from_query(page.into_inner(), limit.into_inner(), search.into_inner())
}
