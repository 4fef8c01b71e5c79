//! Quarry prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    active::{active_products, active_products_in, browsable_collections},
    collections::{Collection, CollectionId, CollectionUpdate, NewCollection},
    entity::{Entity, EntityKind},
    gallery::{GalleryImage, GalleryImageId, GalleryImageUpdate, NewGalleryImage},
    ids::TypedId,
    lightbox::{Lightbox, LightboxImage},
    pagination::{MAX_PAGE_SIZE, Page, PageRequest, Pagination, paginate},
    products::{NewProduct, Product, ProductId, ProductUpdate},
    selection::{
        Resolution, Selection, SelectionController, SelectionError, VariantTicket, VariantsState,
    },
    store::{CatalogStore, StoreError},
    validation::ValidationError,
    variants::{MAX_VARIANT_IMAGES, NewVariant, Variant, VariantId, VariantUpdate},
};
