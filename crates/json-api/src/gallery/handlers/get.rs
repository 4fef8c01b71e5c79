//! Get Gallery Image Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::gallery::{GalleryImage, GalleryImageId};

use crate::{extensions::*, gallery::errors::into_status_error, state::State};

/// Gallery Image Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GalleryImageResponse {
    pub id: i64,
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<GalleryImage> for GalleryImageResponse {
    fn from(image: GalleryImage) -> Self {
        Self {
            id: image.id.into_i64(),
            image_url: image.image_url,
            title: image.title,
            description: image.description,
            category: image.category,
        }
    }
}

/// Get Gallery Image Handler
#[endpoint(
    tags("gallery"),
    summary = "Get Gallery Image",
    responses(
        (status_code = StatusCode::OK, description = "Gallery image found"),
        (status_code = StatusCode::NOT_FOUND, description = "Gallery image not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<GalleryImageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let image = state
        .app
        .gallery
        .get_gallery_image(GalleryImageId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(image.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quarry_app::domain::{CatalogServiceError, gallery::MockGalleryService};

    use crate::test_helpers::gallery_app;

    use super::{super::tests::make_image, *};

    fn make_service(gallery: MockGalleryService) -> Service {
        gallery_app(gallery).anonymous_service(Router::with_path("gallery/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_gallery_image() -> TestResult {
        let mut gallery = MockGalleryService::new();

        gallery
            .expect_get_gallery_image()
            .once()
            .withf(|id| *id == GalleryImageId::new(4))
            .return_once(|_| Ok(make_image(4, Some("kitchens"))));

        let mut res = TestClient::get("http://example.com/gallery/4")
            .send(&make_service(gallery))
            .await;

        let body: GalleryImageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.category.as_deref(), Some("kitchens"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_gallery_image_returns_404() -> TestResult {
        let mut gallery = MockGalleryService::new();

        gallery
            .expect_get_gallery_image()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get("http://example.com/gallery/4")
            .send(&make_service(gallery))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
