//! Get Variant Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use quarry::variants::VariantId;
use quarry_app::domain::variants::VariantListing;

use crate::{extensions::*, state::State, variants::errors::into_status_error};

/// The product a variant belongs to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantProductResponse {
    /// Product id
    pub id: i64,

    /// Product name
    pub name: String,
}

/// Variant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    /// Variant id
    pub id: i64,

    /// Owning product
    #[serde(rename = "productId")]
    pub product: VariantProductResponse,

    /// Variant name
    pub name: String,

    /// Up to three image paths, in display order
    pub images: Vec<String>,
}

impl From<VariantListing> for VariantResponse {
    fn from(listing: VariantListing) -> Self {
        let variant = listing.variant;

        Self {
            id: variant.id.into_i64(),
            product: VariantProductResponse {
                id: variant.product_id.into_i64(),
                name: listing.product_name,
            },
            name: variant.name,
            images: variant.images.into_vec(),
        }
    }
}

/// Get Variant Handler
#[endpoint(
    tags("product-variants"),
    summary = "Get Variant",
    responses(
        (status_code = StatusCode::OK, description = "Variant found"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listing = state
        .app
        .variants
        .get_variant(VariantId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(listing.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quarry_app::domain::{CatalogServiceError, variants::MockVariantsService};

    use crate::test_helpers::variants_app;

    use super::{super::tests::make_listing, *};

    fn make_service(variants: MockVariantsService) -> Service {
        let route = Router::with_path("product-variants/{id}").get(handler);

        variants_app(variants).anonymous_service(route)
    }

    #[tokio::test]
    async fn test_get_variant_nests_product_reference() -> TestResult {
        let mut variants = MockVariantsService::new();

        variants
            .expect_get_variant()
            .once()
            .withf(|id| *id == VariantId::new(100))
            .return_once(|_| Ok(make_listing(100, &["/img/a.png"])));

        let body: serde_json::Value = TestClient::get("http://example.com/product-variants/100")
            .send(&make_service(variants))
            .await
            .take_json()
            .await?;

        assert_eq!(
            body,
            serde_json::json!({
                "id": 100,
                "productId": { "id": 10, "name": "Carrara" },
                "name": "Slab 100",
                "images": ["/img/a.png"]
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_variant_returns_404() -> TestResult {
        let mut variants = MockVariantsService::new();

        variants
            .expect_get_variant()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get("http://example.com/product-variants/5")
            .send(&make_service(variants))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
