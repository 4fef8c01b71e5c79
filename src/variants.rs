//! Variants

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    entity::{Entity, EntityKind},
    ids::TypedId,
    products::ProductId,
    validation::{ValidationError, require_image_url, require_name},
};

/// Most images a variant may carry.
pub const MAX_VARIANT_IMAGES: usize = 3;

/// Variant Id
pub type VariantId = TypedId<Variant>;

/// Ordered image paths for one variant.
pub type VariantImages = SmallVec<[String; MAX_VARIANT_IMAGES]>;

/// A finish or cut of a product, shown as up to three images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Primary key
    pub id: VariantId,

    /// Owning product
    pub product_id: ProductId,

    /// Display name
    pub name: String,

    /// Image paths in display order; may be empty
    pub images: VariantImages,
}

impl Variant {
    /// Whether this variant makes its product active.
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

impl Entity for Variant {
    const KIND: EntityKind = EntityKind::Variant;

    fn id(&self) -> VariantId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// New Variant Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVariant {
    /// Owning product
    pub product_id: ProductId,

    /// Display name
    pub name: String,

    /// Image paths in display order
    #[serde(default)]
    pub images: Vec<String>,
}

/// Variant Update Data
pub type VariantUpdate = NewVariant;

impl NewVariant {
    /// Return a trimmed copy, enforcing the image bound.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        if self.product_id.into_i64() <= 0 {
            return Err(ValidationError::InvalidReference {
                field: "product_id",
            });
        }

        if self.images.len() > MAX_VARIANT_IMAGES {
            return Err(ValidationError::TooManyImages {
                count: self.images.len(),
                max: MAX_VARIANT_IMAGES,
            });
        }

        let images = self
            .images
            .iter()
            .map(|image| require_image_url(image))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            product_id: self.product_id,
            name: require_name(&self.name)?,
            images,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(images: &[&str]) -> NewVariant {
        NewVariant {
            product_id: ProductId::new(10),
            name: "Polished".to_string(),
            images: images.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn validated_accepts_fewer_than_three_images() {
        assert!(draft(&[]).validated().is_ok(), "zero images is allowed");
        assert!(draft(&["/a.png"]).validated().is_ok(), "one image is allowed");
    }

    #[test]
    fn validated_rejects_fourth_image() {
        assert_eq!(
            draft(&["/a.png", "/b.png", "/c.png", "/d.png"]).validated(),
            Err(ValidationError::TooManyImages { count: 4, max: 3 })
        );
    }

    #[test]
    fn validated_rejects_blank_image() {
        assert_eq!(
            draft(&["/a.png", " "]).validated(),
            Err(ValidationError::EmptyImageUrl)
        );
    }
}
