//! Delete Collection Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use quarry::collections::CollectionId;

use crate::{collections::errors::into_status_error, extensions::*, state::State};

/// Delete Collection Handler
///
/// A collection that still holds products cannot be deleted.
#[endpoint(
    tags("collections"),
    summary = "Delete Collection",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Collection deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Collection not found"),
        (status_code = StatusCode::CONFLICT, description = "Collection still has products"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "collections.delete",
    skip(id, depot),
    fields(admin_uuid = tracing::field::Empty, collection_id = tracing::field::Empty),
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
    span.record("collection_id", id);

    state
        .app
        .collections
        .delete_collection(CollectionId::new(id))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use quarry_app::domain::{CatalogServiceError, collections::MockCollectionsService};

    use crate::test_helpers::collections_app;

    use super::*;

    fn make_service(collections: MockCollectionsService) -> Service {
        let route = Router::with_path("collections/{id}").delete(handler);

        collections_app(collections).service(route)
    }

    #[tokio::test]
    async fn test_delete_collection_success() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_delete_collection()
            .once()
            .withf(|id| *id == CollectionId::new(1))
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/collections/1")
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_collection_with_products_returns_409() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_delete_collection()
            .once()
            .return_once(|_| Err(CatalogServiceError::HasDependents));

        let res = TestClient::delete("http://example.com/collections/1")
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
