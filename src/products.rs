//! Products

use serde::{Deserialize, Serialize};

use crate::{
    collections::CollectionId,
    entity::{Entity, EntityKind},
    ids::TypedId,
    validation::{ValidationError, require_image_url, require_name},
};

/// Product Id
pub type ProductId = TypedId<Product>;

/// A stone product belonging to exactly one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Owning collection
    pub collection_id: CollectionId,

    /// Owning collection's name, when the source joined it in
    pub collection_name: Option<String>,

    /// Cover image path
    pub image_url: String,
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> ProductId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name
    pub name: String,

    /// Owning collection
    pub collection_id: CollectionId,

    /// Cover image path
    pub image_url: String,
}

/// Product Update Data
pub type ProductUpdate = NewProduct;

impl NewProduct {
    /// Return a trimmed copy, rejecting blank fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        if self.collection_id.into_i64() <= 0 {
            return Err(ValidationError::InvalidReference {
                field: "collection_id",
            });
        }

        Ok(Self {
            name: require_name(&self.name)?,
            collection_id: self.collection_id,
            image_url: require_image_url(&self.image_url)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(collection: i64) -> NewProduct {
        NewProduct {
            name: " Carrara ".to_string(),
            collection_id: CollectionId::new(collection),
            image_url: "/uploads/carrara.png".to_string(),
        }
    }

    #[test]
    fn validated_trims_name() {
        let product = draft(1).validated();

        assert_eq!(product.map(|p| p.name), Ok("Carrara".to_string()));
    }

    #[test]
    fn validated_rejects_missing_collection() {
        assert_eq!(
            draft(0).validated(),
            Err(ValidationError::InvalidReference {
                field: "collection_id"
            })
        );
    }

    #[test]
    fn validated_rejects_blank_image() {
        let mut product = draft(1);
        product.image_url = String::new();

        assert_eq!(product.validated(), Err(ValidationError::EmptyImageUrl));
    }
}
