//! Update Collection Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use quarry::collections::CollectionId;

use crate::{
    collections::{create::CollectionRequest, errors::into_status_error, get::CollectionResponse},
    extensions::*,
    state::State,
};

/// Update Collection Handler
#[endpoint(
    tags("collections"),
    summary = "Rename Collection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Collection updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Collection not found"),
        (status_code = StatusCode::CONFLICT, description = "Collection name already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "collections.update",
    skip(id, json, depot),
    fields(admin_uuid = tracing::field::Empty, collection_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<CollectionRequest>,
    depot: &mut Depot,
) -> Result<Json<CollectionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("collection_id", id);

    let collection = state
        .app
        .collections
        .update_collection(CollectionId::new(id), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(collection.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use quarry_app::domain::{CatalogServiceError, collections::MockCollectionsService};

    use crate::test_helpers::collections_app;

    use super::{super::tests::make_collection, *};

    fn make_service(collections: MockCollectionsService) -> Service {
        collections_app(collections).service(Router::with_path("collections/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_collection_renames() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_update_collection()
            .once()
            .withf(|id, update| *id == CollectionId::new(3) && update.name == "Travertine")
            .return_once(|_, _| Ok(make_collection(3, "Travertine")));

        let mut res = TestClient::put("http://example.com/collections/3")
            .json(&json!({ "name": "Travertine" }))
            .send(&make_service(collections))
            .await;

        let body: CollectionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Travertine");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_collection_returns_404() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_update_collection()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::NotFound));

        let res = TestClient::put("http://example.com/collections/404")
            .json(&json!({ "name": "Travertine" }))
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_body_returns_400() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections.expect_update_collection().never();

        let res = TestClient::put("http://example.com/collections/3")
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
