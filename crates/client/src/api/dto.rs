//! Wire shapes of the JSON API.
//!
//! Everything here is decoded from the network and immediately mapped into the
//! catalog model; nothing outside this module sees these types.

use serde::{Deserialize, Serialize};

use quarry::{
    collections::{Collection, CollectionId},
    gallery::{GalleryImage, GalleryImageId},
    products::{Product, ProductId},
    variants::{NewVariant, Variant, VariantId},
};

/// Turns server-relative image paths into absolute URLs.
#[derive(Debug, Clone)]
pub(crate) struct AssetBase {
    base: String,
}

impl AssetBase {
    pub(crate) fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionDto {
    id: i64,
    name: String,
}

impl From<CollectionDto> for Collection {
    fn from(dto: CollectionDto) -> Self {
        Collection {
            id: CollectionId::new(dto.id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductDto {
    id: i64,
    name: String,
    collection_id: i64,
    #[serde(default)]
    collection_name: Option<String>,
    image_url: String,
}

impl ProductDto {
    pub(crate) fn into_model(self, assets: &AssetBase) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            collection_id: CollectionId::new(self.collection_id),
            collection_name: self.collection_name,
            image_url: assets.resolve(&self.image_url),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantProductDto {
    id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantDto {
    id: i64,
    #[serde(rename = "productId")]
    product: VariantProductDto,
    name: String,
    #[serde(default)]
    images: Vec<String>,
}

impl VariantDto {
    pub(crate) fn into_model(self, assets: &AssetBase) -> Variant {
        Variant {
            id: VariantId::new(self.id),
            product_id: ProductId::new(self.product.id),
            name: self.name,
            images: self
                .images
                .iter()
                .map(|image| assets.resolve(image))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GalleryImageDto {
    id: i64,
    image_url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl GalleryImageDto {
    pub(crate) fn into_model(self, assets: &AssetBase) -> GalleryImage {
        GalleryImage {
            id: GalleryImageId::new(self.id),
            image_url: assets.resolve(&self.image_url),
            title: self.title,
            description: self.description,
            category: self.category,
        }
    }
}

/// Variant write body; the server names the owner `productId`.
#[derive(Debug, Serialize)]
pub(crate) struct VariantWriteDto<'a> {
    #[serde(rename = "productId")]
    product_id: i64,
    name: &'a str,
    images: &'a [String],
}

impl<'a> From<&'a NewVariant> for VariantWriteDto<'a> {
    fn from(variant: &'a NewVariant) -> Self {
        Self {
            product_id: variant.product_id.into_i64(),
            name: &variant.name,
            images: &variant.images,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginDto<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssuedTokenDto {
    pub token: String,
    pub expires_at: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminDto {
    pub uuid: String,
    pub username: String,
}

/// Salvo renders status errors as `{"error": {"brief": ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBodyDto {
    error: ErrorDetailDto,
}

#[derive(Debug, Deserialize)]
struct ErrorDetailDto {
    #[serde(default)]
    brief: String,
}

impl ErrorBodyDto {
    pub(crate) fn into_brief(self) -> String {
        self.error.brief
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn nested_product_reference_maps_to_product_id() -> TestResult {
        let dto: VariantDto = serde_json::from_value(serde_json::json!({
            "id": 100,
            "productId": { "id": 10, "name": "Carrara" },
            "name": "Slab 100",
            "images": ["/img/a.png"]
        }))?;

        let variant = dto.into_model(&AssetBase::new("http://localhost:8698/"));

        assert_eq!(variant.product_id, ProductId::new(10));
        assert_eq!(variant.images.as_slice(), ["http://localhost:8698/img/a.png"]);

        Ok(())
    }

    #[test]
    fn absolute_image_urls_are_left_alone() {
        let assets = AssetBase::new("http://localhost:8698");

        assert_eq!(
            assets.resolve("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(assets.resolve("uploads/a.png"), "http://localhost:8698/uploads/a.png");
    }

    #[test]
    fn variant_write_body_uses_product_id_key() -> TestResult {
        let variant = NewVariant {
            product_id: ProductId::new(10),
            name: "Slab".to_string(),
            images: vec!["/img/a.png".to_string()],
        };

        let body = serde_json::to_value(VariantWriteDto::from(&variant))?;

        assert_eq!(
            body,
            serde_json::json!({ "productId": 10, "name": "Slab", "images": ["/img/a.png"] })
        );

        Ok(())
    }
}
