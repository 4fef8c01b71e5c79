//! Update Gallery Image Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use quarry::gallery::GalleryImageId;

use crate::{
    extensions::*,
    gallery::{create::GalleryImageRequest, errors::into_status_error, get::GalleryImageResponse},
    state::State,
};

/// Update Gallery Image Handler
///
/// JSON body only.
#[endpoint(
    tags("gallery"),
    summary = "Update Gallery Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gallery image updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Gallery image not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "gallery.update",
    skip(id, json, depot),
    fields(admin_uuid = tracing::field::Empty, image_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<GalleryImageRequest>,
    depot: &mut Depot,
) -> Result<Json<GalleryImageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let id = id.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("image_id", id);

    let image = state
        .app
        .gallery
        .update_gallery_image(GalleryImageId::new(id), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(image.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use quarry_app::domain::{CatalogServiceError, gallery::MockGalleryService};

    use crate::test_helpers::gallery_app;

    use super::{super::tests::make_image, *};

    fn make_service(gallery: MockGalleryService) -> Service {
        gallery_app(gallery).service(Router::with_path("gallery/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_gallery_image_category() -> TestResult {
        let mut gallery = MockGalleryService::new();

        gallery
            .expect_update_gallery_image()
            .once()
            .withf(|id, update| {
                *id == GalleryImageId::new(2) && update.category.as_deref() == Some("facades")
            })
            .return_once(|_, _| Ok(make_image(2, Some("facades"))));

        let mut res = TestClient::put("http://example.com/gallery/2")
            .json(&json!({ "image_url": "/uploads/gallery/2.jpg", "category": "facades" }))
            .send(&make_service(gallery))
            .await;

        let body: GalleryImageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.category.as_deref(), Some("facades"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_gallery_image_returns_404() -> TestResult {
        let mut gallery = MockGalleryService::new();

        gallery
            .expect_update_gallery_image()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::NotFound));

        let res = TestClient::put("http://example.com/gallery/2")
            .json(&json!({ "image_url": "/uploads/gallery/2.jpg" }))
            .send(&make_service(gallery))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
