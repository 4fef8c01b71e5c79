//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::{collections::CollectionId, products::NewProduct};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product write payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    /// Product name
    pub name: String,

    /// Owning collection id
    pub collection_id: i64,

    /// Representative image path, already uploaded
    pub image_url: String,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            name: request.name,
            collection_id: CollectionId::new(request.collection_id),
            image_url: request.image_url,
        }
    }
}

/// Create Product Handler
///
/// Takes a JSON body naming an image that is already stored. Multipart
/// uploads are not accepted here.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(
        admin_uuid = tracing::field::Empty,
        collection_id = tracing::field::Empty,
        product_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin));
    span.record("collection_id", request.collection_id);

    let product = state
        .app
        .products
        .create_product(request.into())
        .await
        .map_err(into_status_error)?;

    span.record("product_id", product.id.into_i64());

    res.add_header(LOCATION, format!("/api/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use quarry_app::domain::{CatalogServiceError, products::MockProductsService};

    use crate::test_helpers::products_app;

    use super::{super::tests::make_product, *};

    fn make_service(products: MockProductsService) -> Service {
        products_app(products).service(Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                *new == NewProduct {
                    name: "Carrara".to_string(),
                    collection_id: CollectionId::new(1),
                    image_url: "/uploads/products/10.jpg".to_string(),
                }
            })
            .return_once(|_| Ok(make_product(10, "Carrara")));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Carrara",
                "collection_id": 1,
                "image_url": "/uploads/products/10.jpg"
            }))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/api/products/10"));
        assert_eq!(body.collection_name.as_deref(), Some("Marble"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_in_unknown_collection_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Carrara",
                "collection_id": 77,
                "image_url": "/uploads/products/10.jpg"
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_field_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Carrara" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_multipart_body_is_rejected() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .add_header(CONTENT_TYPE, "multipart/form-data; boundary=quarry", true)
            .body(concat!(
                "--quarry\r\n",
                "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
                "Carrara\r\n",
                "--quarry--\r\n",
            ))
            .send(&make_service(products))
            .await;

        assert!(
            res.status_code.is_some_and(|status| status.is_client_error()),
            "multipart bodies must not be accepted"
        );

        Ok(())
    }
}
