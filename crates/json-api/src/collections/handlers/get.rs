//! Get Collection Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::collections::{Collection, CollectionId};

use crate::{collections::errors::into_status_error, extensions::*, state::State};

/// Collection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionResponse {
    /// Collection id
    pub id: i64,

    /// Collection name
    pub name: String,
}

impl From<Collection> for CollectionResponse {
    fn from(collection: Collection) -> Self {
        Self {
            id: collection.id.into_i64(),
            name: collection.name,
        }
    }
}

/// Get Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Get Collection",
    responses(
        (status_code = StatusCode::OK, description = "Collection found"),
        (status_code = StatusCode::NOT_FOUND, description = "Collection not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CollectionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let collection = state
        .app
        .collections
        .get_collection(CollectionId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(collection.into()))
}
