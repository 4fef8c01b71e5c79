//! Catalog entities

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// The four entity types held by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// [`crate::collections::Collection`]
    Collection,

    /// [`crate::products::Product`]
    Product,

    /// [`crate::variants::Variant`]
    Variant,

    /// [`crate::gallery::GalleryImage`]
    GalleryImage,
}

impl EntityKind {
    /// Every kind, in hierarchy order.
    pub const ALL: [Self; 4] = [
        Self::Collection,
        Self::Product,
        Self::Variant,
        Self::GalleryImage,
    ];

    /// The REST resource segment under `/api`.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Collection => "collections",
            Self::Product => "products",
            Self::Variant => "product-variants",
            Self::GalleryImage => "gallery",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Collection => "collection",
            Self::Product => "product",
            Self::Variant => "variant",
            Self::GalleryImage => "gallery image",
        })
    }
}

/// Anything that can be listed through the page protocol.
pub trait Entity: Sized {
    /// Which entity type this is.
    const KIND: EntityKind;

    /// Primary key.
    fn id(&self) -> TypedId<Self>;

    /// Name matched by the `search` parameter.
    fn display_name(&self) -> &str;
}
