//! Update Variant Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use quarry::variants::VariantId;

use crate::{
    extensions::*,
    state::State,
    variants::{create::VariantRequest, errors::into_status_error, get::VariantResponse},
};

/// Update Variant Handler
///
/// Replaces the name, owning product and the full image list. The body is
/// JSON carrying already stored image URLs, never a multipart upload.
#[endpoint(
    tags("product-variants"),
    summary = "Update Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Variant updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "variants.update",
    skip(id, json, depot),
    fields(
        admin_uuid = tracing::field::Empty,
        variant_id = tracing::field::Empty,
        images_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<VariantRequest>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let request = json.into_inner();
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("variant_id", id);
    span.record("images_count", request.images.len());

    let listing = state
        .app
        .variants
        .update_variant(VariantId::new(id), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(listing.into()))
}
