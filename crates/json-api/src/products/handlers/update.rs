//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use quarry::products::ProductId;

use crate::{
    extensions::*,
    products::{create::ProductRequest, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Handler
///
/// JSON only; `image_url` must point at an already stored image.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, json, depot),
    fields(
        admin_uuid = tracing::field::Empty,
        product_id = tracing::field::Empty,
        collection_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let request = json.into_inner();
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("product_id", id);
    span.record("collection_id", request.collection_id);

    let product = state
        .app
        .products
        .update_product(ProductId::new(id), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
