//! Variants Of Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use quarry::products::ProductId;

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, get::VariantResponse},
};

/// Variants Of Product Handler
///
/// Returns every variant of one product, unpaginated. Unknown products have
/// no variants.
#[endpoint(
    tags("product-variants"),
    summary = "List Variants Of Product",
    responses(
        (status_code = StatusCode::OK, description = "Variants of the product"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<VariantResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listings = state
        .app
        .variants
        .variants_for_product(ProductId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(listings.into_iter().map(Into::into).collect()))
}
