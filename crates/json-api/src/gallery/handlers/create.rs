//! Create Gallery Image Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::gallery::NewGalleryImage;

use crate::{
    extensions::*,
    gallery::{errors::into_status_error, get::GalleryImageResponse},
    state::State,
};

/// Gallery image write payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GalleryImageRequest {
    /// Already uploaded image path
    pub image_url: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

impl From<GalleryImageRequest> for NewGalleryImage {
    fn from(request: GalleryImageRequest) -> Self {
        NewGalleryImage {
            image_url: request.image_url,
            title: request.title,
            description: request.description,
            category: request.category,
        }
    }
}

/// Create Gallery Image Handler
///
/// Registers an image that is already stored, from a JSON body. Multipart
/// uploads are not accepted.
#[endpoint(
    tags("gallery"),
    summary = "Create Gallery Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Gallery image created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "gallery.create",
    skip(json, depot, res),
    fields(admin_uuid = tracing::field::Empty, image_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<GalleryImageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<GalleryImageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));

    let image = state
        .app
        .gallery
        .create_gallery_image(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("image_id", image.id.into_i64());

    res.add_header(LOCATION, format!("/api/gallery/{}", image.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(image.into()))
}
