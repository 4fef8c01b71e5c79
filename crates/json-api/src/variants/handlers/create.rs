//! Create Variant Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::{products::ProductId, variants::NewVariant};

use crate::{
    extensions::*,
    state::State,
    variants::{errors::into_status_error, get::VariantResponse},
};

/// Variant write payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantRequest {
    /// Owning product id
    #[serde(rename = "productId")]
    pub product_id: i64,

    /// Variant name
    pub name: String,

    /// Already uploaded image paths, at most three
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<VariantRequest> for NewVariant {
    fn from(request: VariantRequest) -> Self {
        NewVariant {
            product_id: ProductId::new(request.product_id),
            name: request.name,
            images: request.images,
        }
    }
}

/// Create Variant Handler
///
/// The body is JSON with up to three already stored image URLs. File
/// uploads (multipart) are not accepted.
#[endpoint(
    tags("product-variants"),
    summary = "Create Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "variants.create",
    skip(json, depot, res),
    fields(
        admin_uuid = tracing::field::Empty,
        product_id = tracing::field::Empty,
        images_count = tracing::field::Empty,
        variant_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<VariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("product_id", request.product_id);
    span.record("images_count", request.images.len());

    let listing = state
        .app
        .variants
        .create_variant(request.into())
        .await
        .map_err(into_status_error)?;

    span.record("variant_id", listing.variant.id.into_i64());

    res.add_header(
        LOCATION,
        format!("/api/product-variants/{}", listing.variant.id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(listing.into()))
}
