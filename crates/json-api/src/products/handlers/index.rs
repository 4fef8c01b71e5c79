//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PaginationResponse, page_request},
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// One page of products
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Products on this page
    pub data: Vec<ProductResponse>,

    /// Page metadata
    pub pagination: PaginationResponse,
}

/// Product Index Handler
///
/// Returns one page of products with their collection names. Pages past the
/// end are empty but still report the real totals.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .products
        .list_products(page_request(page, limit, search))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        data: page.data.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}
