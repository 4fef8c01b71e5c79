//! Delete Gallery Image Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use quarry::gallery::GalleryImageId;

use crate::{extensions::*, gallery::errors::into_status_error, state::State};

/// Delete Gallery Image Handler
#[endpoint(
    tags("gallery"),
    summary = "Delete Gallery Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gallery image deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Gallery image not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "gallery.delete",
    skip(id, depot),
    fields(admin_uuid = tracing::field::Empty, image_id = tracing::field::Empty),
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
    span.record("image_id", id);

    state
        .app
        .gallery
        .delete_gallery_image(GalleryImageId::new(id))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use quarry_app::domain::gallery::MockGalleryService;

    use crate::test_helpers::gallery_app;

    use super::*;

    #[tokio::test]
    async fn test_delete_gallery_image_success() -> TestResult {
        let mut gallery = MockGalleryService::new();

        gallery
            .expect_delete_gallery_image()
            .once()
            .withf(|id| *id == GalleryImageId::new(2))
            .return_once(|_| Ok(()));

        let route = Router::with_path("gallery/{id}").delete(handler);

        let res = TestClient::delete("http://example.com/gallery/2")
            .send(&gallery_app(gallery).service(route))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
