//! Catalog Store
//!
//! Client-side cache of the current page of each entity type, plus the full
//! collection, product and variant sets that browsing derives its active sets
//! from. Paging through a list never changes what is browsable. The store is
//! only ever written by replacing a whole page or set with a fresh service
//! response, or by invalidating a type after a mutation. Lookups for ids the
//! store does not hold are errors.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    active,
    collections::{Collection, CollectionId},
    entity::{Entity, EntityKind},
    gallery::{GalleryImage, GalleryImageId},
    ids::TypedId,
    pagination::{Page, PageRequest, Pagination},
    products::{Product, ProductId},
    variants::{Variant, VariantId},
};

/// Catalog store lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The id is not held by the store, either because it was never loaded or
    /// because its type was invalidated.
    #[error("{kind} {id} is not in the catalog store")]
    Stale {
        /// Entity type looked up
        kind: EntityKind,
        /// Raw id looked up
        id: i64,
    },
}

#[derive(Debug)]
struct Slot<T: Entity> {
    entries: BTreeMap<TypedId<T>, T>,
    pagination: Option<Pagination>,
    request: PageRequest,
}

impl<T: Entity> Default for Slot<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            pagination: None,
            request: PageRequest::default(),
        }
    }
}

impl<T: Entity> Slot<T> {
    fn replace(&mut self, page: Page<T>, request: PageRequest) {
        self.entries = page
            .data
            .into_iter()
            .map(|entry| (entry.id(), entry))
            .collect();

        self.pagination = Some(page.pagination);
        self.request = request;
    }

    fn invalidate(&mut self) {
        self.entries.clear();
        self.pagination = None;
    }

    fn get(&self, id: TypedId<T>) -> Result<&T, StoreError> {
        self.entries.get(&id).ok_or(StoreError::Stale {
            kind: T::KIND,
            id: id.into_i64(),
        })
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

/// Every collection, product and variant, gathered across all pages.
#[derive(Debug, Default)]
struct BrowseSet {
    collections: BTreeMap<CollectionId, Collection>,
    products: BTreeMap<ProductId, Product>,
    variants: BTreeMap<VariantId, Variant>,
    variants_by_product: FxHashMap<ProductId, SmallVec<[VariantId; 4]>>,
}

fn keyed<T: Entity>(entries: impl IntoIterator<Item = T>) -> BTreeMap<TypedId<T>, T> {
    entries.into_iter().map(|entry| (entry.id(), entry)).collect()
}

/// In-memory catalog: one cached page per entity type and the browse set.
#[derive(Debug, Default)]
pub struct CatalogStore {
    collections: Slot<Collection>,
    products: Slot<Product>,
    variants: Slot<Variant>,
    gallery: Slot<GalleryImage>,
    browse: BrowseSet,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached collections page.
    pub fn replace_collections(&mut self, page: Page<Collection>, request: PageRequest) {
        debug!(count = page.len(), "replacing collections page");

        self.collections.replace(page, request);
    }

    /// Replace the cached products page.
    pub fn replace_products(&mut self, page: Page<Product>, request: PageRequest) {
        debug!(count = page.len(), "replacing products page");

        self.products.replace(page, request);
    }

    /// Replace the cached variants page.
    pub fn replace_variants(&mut self, page: Page<Variant>, request: PageRequest) {
        debug!(count = page.len(), "replacing variants page");

        self.variants.replace(page, request);
    }

    /// Replace the cached gallery page.
    pub fn replace_gallery(&mut self, page: Page<GalleryImage>, request: PageRequest) {
        debug!(count = page.len(), "replacing gallery page");

        self.gallery.replace(page, request);
    }

    /// Replace every known collection.
    pub fn replace_all_collections(&mut self, collections: impl IntoIterator<Item = Collection>) {
        self.browse.collections = keyed(collections);

        debug!(count = self.browse.collections.len(), "replaced browse collections");
    }

    /// Replace every known product.
    pub fn replace_all_products(&mut self, products: impl IntoIterator<Item = Product>) {
        self.browse.products = keyed(products);

        debug!(count = self.browse.products.len(), "replaced browse products");
    }

    /// Replace every known variant and rebuild the per-product lookup.
    pub fn replace_all_variants(&mut self, variants: impl IntoIterator<Item = Variant>) {
        self.browse.variants = keyed(variants);
        self.rebuild_variant_lookup();

        debug!(count = self.browse.variants.len(), "replaced browse variants");
    }

    /// Drop the cached page and browse set of exactly one entity type.
    ///
    /// The request that produced the page is kept so the caller can refetch
    /// the same page.
    pub fn invalidate(&mut self, kind: EntityKind) {
        debug!(%kind, "invalidating cached data");

        match kind {
            EntityKind::Collection => {
                self.collections.invalidate();
                self.browse.collections.clear();
            }
            EntityKind::Product => {
                self.products.invalidate();
                self.browse.products.clear();
            }
            EntityKind::Variant => {
                self.variants.invalidate();
                self.browse.variants.clear();
                self.browse.variants_by_product.clear();
            }
            EntityKind::GalleryImage => self.gallery.invalidate(),
        }
    }

    /// Whether `kind` currently holds a page.
    #[must_use]
    pub fn is_loaded(&self, kind: EntityKind) -> bool {
        self.pagination(kind).is_some()
    }

    /// Metadata of the cached page for `kind`.
    #[must_use]
    pub fn pagination(&self, kind: EntityKind) -> Option<Pagination> {
        match kind {
            EntityKind::Collection => self.collections.pagination,
            EntityKind::Product => self.products.pagination,
            EntityKind::Variant => self.variants.pagination,
            EntityKind::GalleryImage => self.gallery.pagination,
        }
    }

    /// The request behind the current (or last invalidated) page of `kind`.
    #[must_use]
    pub fn request(&self, kind: EntityKind) -> &PageRequest {
        match kind {
            EntityKind::Collection => &self.collections.request,
            EntityKind::Product => &self.products.request,
            EntityKind::Variant => &self.variants.request,
            EntityKind::GalleryImage => &self.gallery.request,
        }
    }

    /// Look up a cached collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Stale`] when the id is not cached.
    pub fn collection(&self, id: CollectionId) -> Result<&Collection, StoreError> {
        self.collections.get(id)
    }

    /// Look up a cached product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Stale`] when the id is not cached.
    pub fn product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.products.get(id)
    }

    /// Look up a cached variant.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Stale`] when the id is not cached.
    pub fn variant(&self, id: VariantId) -> Result<&Variant, StoreError> {
        self.variants.get(id)
    }

    /// Look up a cached gallery image.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Stale`] when the id is not cached.
    pub fn gallery_image(&self, id: GalleryImageId) -> Result<&GalleryImage, StoreError> {
        self.gallery.get(id)
    }

    /// Look up a collection in the browse set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Stale`] when the collection is not known.
    pub fn browse_collection(&self, id: CollectionId) -> Result<&Collection, StoreError> {
        self.browse.collections.get(&id).ok_or(StoreError::Stale {
            kind: EntityKind::Collection,
            id: id.into_i64(),
        })
    }

    /// Look up a product in the browse set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Stale`] when the product is not known.
    pub fn browse_product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.browse.products.get(&id).ok_or(StoreError::Stale {
            kind: EntityKind::Product,
            id: id.into_i64(),
        })
    }

    /// Cached collections in id order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    /// Cached products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Cached variants in id order.
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    /// Cached gallery images in id order.
    pub fn gallery(&self) -> impl Iterator<Item = &GalleryImage> {
        self.gallery.values()
    }

    /// Every known variant of `product`, in id order.
    #[must_use]
    pub fn variants_for(&self, product: ProductId) -> Vec<&Variant> {
        self.browse
            .variants_by_product
            .get(&product)
            .into_iter()
            .flatten()
            .filter_map(|id| self.browse.variants.get(id))
            .collect()
    }

    /// Active products over the browse set.
    #[must_use]
    pub fn active_products(&self) -> Vec<&Product> {
        active::active_products(self.browse.products.values(), self.browse.variants.values())
    }

    /// Browsable collections over the browse set.
    #[must_use]
    pub fn browsable_collections(&self) -> Vec<&Collection> {
        active::browsable_collections(self.browse.collections.values(), &self.active_products())
    }

    /// Active products of one collection over the browse set.
    #[must_use]
    pub fn active_products_in(&self, collection: CollectionId) -> Vec<&Product> {
        active::active_products_in(
            collection,
            self.browse.products.values(),
            self.browse.variants.values(),
        )
    }

    fn rebuild_variant_lookup(&mut self) {
        let mut lookup: FxHashMap<ProductId, SmallVec<[VariantId; 4]>> = FxHashMap::default();

        for variant in self.browse.variants.values() {
            lookup.entry(variant.product_id).or_default().push(variant.id);
        }

        self.browse.variants_by_product = lookup;
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn marble() -> Collection {
        Collection {
            id: CollectionId::new(1),
            name: "Marble".to_string(),
        }
    }

    fn carrara() -> Product {
        Product {
            id: ProductId::new(10),
            name: "Carrara".to_string(),
            collection_id: CollectionId::new(1),
            collection_name: Some("Marble".to_string()),
            image_url: "/uploads/carrara.png".to_string(),
        }
    }

    fn polished() -> Variant {
        Variant {
            id: VariantId::new(100),
            product_id: ProductId::new(10),
            name: "Polished".to_string(),
            images: smallvec!["/img/a.png".to_string()],
        }
    }

    fn page<T>(data: Vec<T>) -> Page<T> {
        let total = data.len() as u64;

        Page::new(data, &PageRequest::default(), total)
    }

    fn loaded_store() -> CatalogStore {
        let mut store = CatalogStore::new();

        store.replace_collections(page(vec![marble()]), PageRequest::default());
        store.replace_products(page(vec![carrara()]), PageRequest::default());
        store.replace_variants(page(vec![polished()]), PageRequest::default());
        store.replace_all_collections([marble()]);
        store.replace_all_products([carrara()]);
        store.replace_all_variants([polished()]);

        store
    }

    #[test]
    fn lookups_return_cached_entities() -> TestResult {
        let store = loaded_store();

        assert_eq!(store.collection(CollectionId::new(1))?.name, "Marble");
        assert_eq!(store.product(ProductId::new(10))?.name, "Carrara");
        assert_eq!(store.variants_for(ProductId::new(10)).len(), 1);

        Ok(())
    }

    #[test]
    fn unknown_id_is_a_stale_error() {
        let store = loaded_store();

        assert_eq!(
            store.product(ProductId::new(99)),
            Err(StoreError::Stale {
                kind: EntityKind::Product,
                id: 99
            })
        );
    }

    #[test]
    fn invalidate_drops_only_the_named_kind() -> TestResult {
        let mut store = loaded_store();

        store.invalidate(EntityKind::Variant);

        assert!(store.variant(VariantId::new(100)).is_err());
        assert!(store.variants_for(ProductId::new(10)).is_empty());
        assert!(!store.is_loaded(EntityKind::Variant));
        assert!(store.is_loaded(EntityKind::Product));
        assert_eq!(store.product(ProductId::new(10))?.name, "Carrara");

        Ok(())
    }

    #[test]
    fn invalidate_keeps_request_for_refetch() {
        let mut store = CatalogStore::new();
        let request = PageRequest::new(2, 5);

        store.replace_gallery(page(Vec::new()), request.clone());
        store.invalidate(EntityKind::GalleryImage);

        assert_eq!(store.request(EntityKind::GalleryImage), &request);
    }

    #[test]
    fn active_sets_are_recomputed_after_invalidation() {
        let mut store = loaded_store();

        assert_eq!(store.browsable_collections().len(), 1);

        store.invalidate(EntityKind::Variant);

        assert!(store.active_products().is_empty());
        assert!(store.browsable_collections().is_empty());
    }

    #[test]
    fn active_sets_ignore_which_page_is_cached() -> TestResult {
        let mut store = loaded_store();
        let calacatta = Product {
            id: ProductId::new(11),
            name: "Calacatta".to_string(),
            ..carrara()
        };
        let honed = Variant {
            id: VariantId::new(110),
            product_id: ProductId::new(11),
            ..polished()
        };

        store.replace_all_products([carrara(), calacatta]);
        store.replace_all_variants([polished(), honed]);
        store.replace_variants(
            Page::new(Vec::new(), &PageRequest::new(3, 1), 2),
            PageRequest::new(3, 1),
        );

        let active: Vec<i64> = store
            .active_products_in(CollectionId::new(1))
            .iter()
            .map(|product| product.id.into_i64())
            .collect();

        assert_eq!(active, vec![10, 11]);
        assert_eq!(store.variants_for(ProductId::new(11)).len(), 1);
        assert_eq!(store.browse_product(ProductId::new(11))?.name, "Calacatta");
        assert!(store.product(ProductId::new(11)).is_err(), "not on the cached page");

        Ok(())
    }
}
