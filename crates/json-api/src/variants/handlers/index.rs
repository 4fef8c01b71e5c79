//! Variant Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
    variants::{errors::into_status_error, get::VariantResponse},
};

/// One page of variants
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantsResponse {
    /// Variants on this page
    pub data: Vec<VariantResponse>,

    /// Page metadata
    pub pagination: PaginationResponse,
}

/// Variant Index Handler
///
/// Lists variants across every product, searching by variant name.
#[endpoint(
    tags("product-variants"),
    summary = "List Variants",
    responses(
        (status_code = StatusCode::OK, description = "Page of variants"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<VariantsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .variants
        .list_variants(page_request(page, limit, search))
        .await
        .map_err(into_status_error)?;

    Ok(Json(VariantsResponse {
        data: page.data.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}
