//! Gallery

use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, EntityKind},
    ids::TypedId,
    validation::{ValidationError, optional_text, require_image_url},
};

/// Gallery Image Id
pub type GalleryImageId = TypedId<GalleryImage>;

/// A showcase image outside the collection hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Primary key
    pub id: GalleryImageId,

    /// Image path
    pub image_url: String,

    /// Optional caption
    pub title: Option<String>,

    /// Optional long description
    pub description: Option<String>,

    /// Optional grouping, e.g. "projects"
    pub category: Option<String>,
}

impl Entity for GalleryImage {
    const KIND: EntityKind = EntityKind::GalleryImage;

    fn id(&self) -> GalleryImageId {
        self.id
    }

    fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// New Gallery Image Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGalleryImage {
    /// Image path
    pub image_url: String,

    /// Optional caption
    pub title: Option<String>,

    /// Optional long description
    pub description: Option<String>,

    /// Optional grouping
    pub category: Option<String>,
}

/// Gallery Image Update Data
pub type GalleryImageUpdate = NewGalleryImage;

impl NewGalleryImage {
    /// Return a trimmed copy with blank optional fields dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyImageUrl`] for a blank image path.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            image_url: require_image_url(&self.image_url)?,
            title: optional_text(self.title.as_deref()),
            description: optional_text(self.description.as_deref()),
            category: optional_text(self.category.as_deref()),
        })
    }
}
