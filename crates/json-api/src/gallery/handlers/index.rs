//! Gallery Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::pagination::PageRequest;

use crate::{
    extensions::*,
    gallery::{errors::into_status_error, get::GalleryImageResponse},
    pagination::PaginationResponse,
    state::State,
};

/// One page of gallery images
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GalleryResponse {
    /// Images on this page
    pub data: Vec<GalleryImageResponse>,

    /// Page metadata
    pub pagination: PaginationResponse,
}

/// Gallery Index Handler
///
/// Returns one page of gallery images, optionally limited to one category.
#[endpoint(
    tags("gallery"),
    summary = "List Gallery Images",
    responses(
        (status_code = StatusCode::OK, description = "Page of gallery images"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<GalleryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = PageRequest::from_query(page.into_inner(), limit.into_inner(), None);

    let page = state
        .app
        .gallery
        .list_gallery_images(request, category.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(GalleryResponse {
        data: page.data.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}
