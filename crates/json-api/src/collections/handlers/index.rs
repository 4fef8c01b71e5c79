//! Collection Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    collections::{errors::into_status_error, get::CollectionResponse},
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
};

/// One page of collections
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionsResponse {
    /// Collections on this page
    pub data: Vec<CollectionResponse>,

    /// Page metadata
    pub pagination: PaginationResponse,
}

/// Collection Index Handler
///
/// Returns one page of collections, optionally filtered by name.
#[endpoint(
    tags("collections"),
    summary = "List Collections",
    responses(
        (status_code = StatusCode::OK, description = "Page of collections"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CollectionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .collections
        .list_collections(page_request(page, limit, search))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CollectionsResponse {
        data: page.data.into_iter().map(Into::into).collect(),
        pagination: page.pagination.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quarry::pagination::{Page, PageRequest};
    use quarry_app::domain::collections::MockCollectionsService;

    use crate::test_helpers::collections_app;

    use super::{super::tests::make_collection, *};

    fn make_service(collections: MockCollectionsService) -> Service {
        collections_app(collections)
            .anonymous_service(Router::with_path("collections").get(handler))
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_page_of_ten() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_list_collections()
            .once()
            .withf(|request| *request == PageRequest::new(1, 10))
            .return_once(|request| {
                Ok(Page::new(
                    vec![make_collection(1, "Marble"), make_collection(2, "Granite")],
                    &request,
                    2,
                ))
            });

        let response: CollectionsResponse = TestClient::get("http://example.com/collections")
            .send(&make_service(collections))
            .await
            .take_json()
            .await?;

        assert_eq!(response.data.len(), 2, "expected both collections");
        assert_eq!(response.data[0].name, "Marble");
        assert_eq!(response.pagination.total_pages, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_search_and_clamps_limit() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_list_collections()
            .once()
            .withf(|request| {
                request.page == 2 && request.limit == 100 && request.search_term() == Some("mar")
            })
            .return_once(|request| Ok(Page::empty(&request)));

        let res = TestClient::get("http://example.com/collections?page=2&limit=500&search=mar")
            .send(&make_service(collections))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_serializes_camel_case_pagination() -> TestResult {
        let mut collections = MockCollectionsService::new();

        collections
            .expect_list_collections()
            .once()
            .return_once(|request| Ok(Page::new(vec![make_collection(7, "Onyx")], &request, 1)));

        let body: serde_json::Value = TestClient::get("http://example.com/collections")
            .send(&make_service(collections))
            .await
            .take_json()
            .await?;

        assert_eq!(
            body,
            serde_json::json!({
                "data": [{ "id": 7, "name": "Onyx" }],
                "pagination": { "page": 1, "pageSize": 10, "total": 1, "totalPages": 1 }
            })
        );

        Ok(())
    }
}
