//! Create Collection Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::collections::NewCollection;

use crate::{
    collections::{errors::into_status_error, get::CollectionResponse},
    extensions::*,
    state::State,
};

/// Collection write payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionRequest {
    /// Unique collection name
    pub name: String,
}

impl From<CollectionRequest> for NewCollection {
    fn from(request: CollectionRequest) -> Self {
        NewCollection { name: request.name }
    }
}

/// Create Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Create Collection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Collection created"),
        (status_code = StatusCode::CONFLICT, description = "Collection name already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "collections.create",
    skip(json, depot, res),
    fields(admin_uuid = tracing::field::Empty, collection_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CollectionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CollectionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));

    let collection = state
        .app
        .collections
        .create_collection(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("collection_id", collection.id.into_i64());

    res.add_header(LOCATION, format!("/api/collections/{}", collection.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(collection.into()))
}
