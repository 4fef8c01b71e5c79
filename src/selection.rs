//! Cascading Selection Controller
//!
//! Tracks the collection → product → variants drill-down. Every variant fetch
//! is tagged with a [`VariantTicket`]; only the result carrying the most recent
//! ticket is applied, so replies arriving out of order after fast clicking can
//! never overwrite the variants of the product the user is looking at.

use thiserror::Error;
use tracing::debug;

use crate::{
    collections::CollectionId,
    products::ProductId,
    store::CatalogStore,
    variants::Variant,
};

/// Tag attached to one variant fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantTicket {
    sequence: u64,
    product: ProductId,
}

impl VariantTicket {
    /// Product whose variants should be fetched.
    #[must_use]
    pub const fn product(&self) -> ProductId {
        self.product
    }

    /// Monotonic request number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Load state of the selected product's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantsState {
    /// Fetch issued, no reply yet.
    Loading,

    /// Fetch succeeded; the list may be empty.
    Loaded(Vec<Variant>),

    /// Fetch failed or timed out.
    Failed(String),
}

/// Current drill-down position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing picked yet.
    NoCollectionSelected,

    /// A collection is picked but no product is.
    CollectionSelected {
        /// Picked collection
        collection: CollectionId,

        /// Set when the collection has no active products to offer.
        no_products: bool,
    },

    /// A product is picked and its variants are loading or loaded.
    ProductSelected {
        /// Picked collection
        collection: CollectionId,

        /// Picked product
        product: ProductId,

        /// Variant load state
        variants: VariantsState,
    },
}

/// Outcome of offering a fetch result to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result matched the current ticket and is now visible.
    Applied,

    /// The result belonged to a superseded selection and was dropped.
    Stale,
}

/// Caller errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The collection is not in the catalog store.
    #[error("collection {0} is not in the catalog")]
    UnknownCollection(CollectionId),

    /// The product is not an active product of the selected collection.
    #[error("product {product} is not selectable in the current collection")]
    ProductNotSelectable {
        /// Requested product
        product: ProductId,

        /// Selected collection at the time of the request
        collection: Option<CollectionId>,
    },
}

/// Drives the collection → product → variants state machine.
#[derive(Debug)]
pub struct SelectionController {
    state: Selection,
    active: Vec<ProductId>,
    sequence: u64,
    pending: Option<VariantTicket>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    /// Start with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Selection::NoCollectionSelected,
            active: Vec::new(),
            sequence: 0,
            pending: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// Active products of the selected collection, in id order.
    #[must_use]
    pub fn active_products(&self) -> &[ProductId] {
        &self.active
    }

    /// Selected collection, if any.
    #[must_use]
    pub fn selected_collection(&self) -> Option<CollectionId> {
        match self.state {
            Selection::NoCollectionSelected => None,
            Selection::CollectionSelected { collection, .. }
            | Selection::ProductSelected { collection, .. } => Some(collection),
        }
    }

    /// Selected product, if any.
    #[must_use]
    pub fn selected_product(&self) -> Option<ProductId> {
        match self.state {
            Selection::ProductSelected { product, .. } => Some(product),
            Selection::NoCollectionSelected | Selection::CollectionSelected { .. } => None,
        }
    }

    /// Loaded variants of the selected product.
    ///
    /// `None` while loading, after a failure, or when no product is selected.
    #[must_use]
    pub fn variants(&self) -> Option<&[Variant]> {
        match &self.state {
            Selection::ProductSelected {
                variants: VariantsState::Loaded(variants),
                ..
            } => Some(variants),
            _ => None,
        }
    }

    /// The ticket the controller is waiting on.
    #[must_use]
    pub fn pending(&self) -> Option<VariantTicket> {
        self.pending
    }

    /// Pick a collection and auto-pick its first active product.
    ///
    /// Returns the fetch to issue when a product was auto-picked, or `None`
    /// when the collection has no active products.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownCollection`] when the collection is
    /// not in `store`.
    pub fn select_collection(
        &mut self,
        collection: CollectionId,
        store: &CatalogStore,
    ) -> Result<Option<VariantTicket>, SelectionError> {
        store
            .browse_collection(collection)
            .map_err(|_stale| SelectionError::UnknownCollection(collection))?;

        self.active = store
            .active_products_in(collection)
            .iter()
            .map(|product| product.id)
            .collect();

        let Some(&first) = self.active.first() else {
            debug!(%collection, "collection has no active products");

            self.pending = None;
            self.state = Selection::CollectionSelected {
                collection,
                no_products: true,
            };

            return Ok(None);
        };

        self.state = Selection::CollectionSelected {
            collection,
            no_products: false,
        };

        Ok(Some(self.begin_fetch(collection, first)))
    }

    /// Pick a product of the selected collection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::ProductNotSelectable`] when no collection is
    /// selected or the product is not one of its active products.
    pub fn select_product(&mut self, product: ProductId) -> Result<VariantTicket, SelectionError> {
        let collection = self.selected_collection();

        match collection {
            Some(collection) if self.active.contains(&product) => {
                Ok(self.begin_fetch(collection, product))
            }
            _ => Err(SelectionError::ProductNotSelectable {
                product,
                collection,
            }),
        }
    }

    /// Offer the outcome of a variant fetch.
    ///
    /// The result is applied only when `ticket` is the latest one issued;
    /// anything else is dropped as stale.
    pub fn resolve(
        &mut self,
        ticket: VariantTicket,
        result: Result<Vec<Variant>, String>,
    ) -> Resolution {
        if self.pending != Some(ticket) {
            debug!(
                sequence = ticket.sequence,
                product = %ticket.product,
                "dropping stale variant response"
            );

            return Resolution::Stale;
        }

        let Selection::ProductSelected { variants, .. } = &mut self.state else {
            return Resolution::Stale;
        };

        *variants = match result {
            Ok(loaded) => VariantsState::Loaded(
                loaded
                    .into_iter()
                    .filter(|variant| variant.product_id == ticket.product)
                    .collect(),
            ),
            Err(reason) => VariantsState::Failed(reason),
        };

        self.pending = None;

        Resolution::Applied
    }

    /// Re-evaluate the selection after the store changed.
    ///
    /// Keeps the selected product when it is still active and reloads its
    /// variants; otherwise re-selects the collection, or clears everything if
    /// the collection itself is gone.
    ///
    /// # Errors
    ///
    /// Never fails for a collection present in `store`; see
    /// [`Self::select_collection`].
    pub fn refresh(
        &mut self,
        store: &CatalogStore,
    ) -> Result<Option<VariantTicket>, SelectionError> {
        let Some(collection) = self.selected_collection() else {
            return Ok(None);
        };

        if store.browse_collection(collection).is_err() {
            self.clear();

            return Ok(None);
        }

        let selected = self.selected_product();

        self.active = store
            .active_products_in(collection)
            .iter()
            .map(|product| product.id)
            .collect();

        match selected {
            Some(product) if self.active.contains(&product) => {
                Ok(Some(self.begin_fetch(collection, product)))
            }
            _ => self.select_collection(collection, store),
        }
    }

    /// Forget the selection and any outstanding fetch.
    pub fn clear(&mut self) {
        self.state = Selection::NoCollectionSelected;
        self.active.clear();
        self.pending = None;
    }

    fn begin_fetch(&mut self, collection: CollectionId, product: ProductId) -> VariantTicket {
        self.sequence += 1;

        let ticket = VariantTicket {
            sequence: self.sequence,
            product,
        };

        self.pending = Some(ticket);
        self.state = Selection::ProductSelected {
            collection,
            product,
            variants: VariantsState::Loading,
        };

        ticket
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{collections::Collection, products::Product, variants::VariantId};

    use super::*;

    fn product(id: i64, collection: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            collection_id: CollectionId::new(collection),
            collection_name: None,
            image_url: String::new(),
        }
    }

    fn variant(id: i64, product: i64) -> Variant {
        Variant {
            id: VariantId::new(id),
            product_id: ProductId::new(product),
            name: format!("Variant {id}"),
            images: smallvec![format!("/img/{id}.png")],
        }
    }

    fn store() -> CatalogStore {
        let collections = vec![
            Collection {
                id: CollectionId::new(1),
                name: "Marble".to_string(),
            },
            Collection {
                id: CollectionId::new(2),
                name: "Onyx".to_string(),
            },
        ];

        let products = vec![product(11, 1), product(10, 1), product(20, 2)];
        let variants = vec![variant(100, 10), variant(110, 11)];

        let mut store = CatalogStore::new();

        store.replace_all_collections(collections);
        store.replace_all_products(products);
        store.replace_all_variants(variants);

        store
    }

    #[test]
    fn selecting_collection_auto_selects_lowest_active_product() -> TestResult {
        let store = store();
        let mut controller = SelectionController::new();

        let ticket = controller
            .select_collection(CollectionId::new(1), &store)?
            .ok_or("expected a variant fetch")?;

        assert_eq!(ticket.product(), ProductId::new(10));
        assert_eq!(
            controller.state(),
            &Selection::ProductSelected {
                collection: CollectionId::new(1),
                product: ProductId::new(10),
                variants: VariantsState::Loading,
            }
        );

        Ok(())
    }

    #[test]
    fn selecting_collection_without_active_products_signals_no_products() -> TestResult {
        let store = store();
        let mut controller = SelectionController::new();

        let ticket = controller.select_collection(CollectionId::new(2), &store)?;

        assert_eq!(ticket, None);
        assert_eq!(
            controller.state(),
            &Selection::CollectionSelected {
                collection: CollectionId::new(2),
                no_products: true,
            }
        );

        Ok(())
    }

    #[test]
    fn selecting_unknown_collection_is_an_error() {
        let mut controller = SelectionController::new();

        assert_eq!(
            controller.select_collection(CollectionId::new(9), &store()),
            Err(SelectionError::UnknownCollection(CollectionId::new(9)))
        );
    }

    #[test]
    fn selecting_product_outside_active_set_is_an_error() -> TestResult {
        let store = store();
        let mut controller = SelectionController::new();

        controller.select_collection(CollectionId::new(1), &store)?;

        assert_eq!(
            controller.select_product(ProductId::new(20)),
            Err(SelectionError::ProductNotSelectable {
                product: ProductId::new(20),
                collection: Some(CollectionId::new(1)),
            })
        );

        Ok(())
    }

    #[test]
    fn selecting_product_before_collection_is_an_error() {
        let mut controller = SelectionController::new();

        assert!(controller.select_product(ProductId::new(10)).is_err());
    }

    #[test]
    fn late_reply_for_superseded_product_is_dropped() -> TestResult {
        let store = store();
        let mut controller = SelectionController::new();

        let first = controller
            .select_collection(CollectionId::new(1), &store)?
            .ok_or("expected a variant fetch")?;
        let second = controller.select_product(ProductId::new(11))?;

        assert_eq!(
            controller.resolve(second, Ok(vec![variant(110, 11)])),
            Resolution::Applied
        );
        assert_eq!(
            controller.resolve(first, Ok(vec![variant(100, 10)])),
            Resolution::Stale
        );

        let visible: Vec<i64> = controller
            .variants()
            .ok_or("variants should be loaded")?
            .iter()
            .map(|v| v.id.into_i64())
            .collect();

        assert_eq!(visible, vec![110]);
        assert_eq!(controller.selected_product(), Some(ProductId::new(11)));

        Ok(())
    }

    #[test]
    fn reselecting_same_product_supersedes_earlier_ticket() -> TestResult {
        let store = store();
        let mut controller = SelectionController::new();

        controller.select_collection(CollectionId::new(1), &store)?;

        let first = controller.select_product(ProductId::new(10))?;
        let second = controller.select_product(ProductId::new(10))?;

        assert_ne!(first, second);
        assert_eq!(controller.resolve(first, Ok(Vec::new())), Resolution::Stale);
        assert_eq!(controller.pending(), Some(second));

        Ok(())
    }

    #[test]
    fn failure_is_distinct_from_empty_success() -> TestResult {
        let store = store();

        let mut failed = SelectionController::new();
        let ticket = failed
            .select_collection(CollectionId::new(1), &store)?
            .ok_or("expected a variant fetch")?;
        failed.resolve(ticket, Err("timed out".to_string()));

        let mut empty = SelectionController::new();
        let ticket = empty
            .select_collection(CollectionId::new(1), &store)?
            .ok_or("expected a variant fetch")?;
        empty.resolve(ticket, Ok(Vec::new()));

        assert!(matches!(
            failed.state(),
            Selection::ProductSelected {
                variants: VariantsState::Failed(_),
                ..
            }
        ));
        assert_eq!(empty.variants(), Some(&[][..]));
        assert_eq!(failed.variants(), None);

        Ok(())
    }

    #[test]
    fn clear_discards_outstanding_fetch() -> TestResult {
        let store = store();
        let mut controller = SelectionController::new();

        let ticket = controller
            .select_collection(CollectionId::new(1), &store)?
            .ok_or("expected a variant fetch")?;

        controller.clear();

        assert_eq!(controller.resolve(ticket, Ok(Vec::new())), Resolution::Stale);
        assert_eq!(controller.state(), &Selection::NoCollectionSelected);

        Ok(())
    }

    #[test]
    fn refresh_falls_back_when_selected_product_becomes_inactive() -> TestResult {
        let mut store = store();
        let mut controller = SelectionController::new();

        controller.select_collection(CollectionId::new(1), &store)?;
        controller.select_product(ProductId::new(11))?;

        store.replace_all_variants([variant(100, 10)]);

        let ticket = controller.refresh(&store)?.ok_or("expected a variant fetch")?;

        assert_eq!(ticket.product(), ProductId::new(10));
        assert_eq!(controller.active_products(), &[ProductId::new(10)]);

        Ok(())
    }
}
