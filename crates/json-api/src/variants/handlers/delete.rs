//! Delete Variant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use quarry::variants::VariantId;

use crate::{extensions::*, state::State, variants::errors::into_status_error};

/// Delete Variant Handler
#[endpoint(
    tags("product-variants"),
    summary = "Delete Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Variant deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "variants.delete",
    skip(id, depot),
    fields(admin_uuid = tracing::field::Empty, variant_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("variant_id", id);

    state
        .app
        .variants
        .delete_variant(VariantId::new(id))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
