//! Catalog browser
//!
//! Ties the store, the selection controller and the lightbox to a
//! [`CatalogApi`]. Variant fetches run as tokio tasks; selecting again aborts
//! the task in flight, and whatever still slips through is dropped by the
//! controller's ticket check.
//!
//! Selection reads the store's browse set, which holds every collection,
//! product and variant. The paged views can move freely without disturbing
//! it.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use quarry::{
    collections::CollectionId,
    entity::EntityKind,
    lightbox::Lightbox,
    pagination::PageRequest,
    products::ProductId,
    selection::{Resolution, Selection, SelectionController, SelectionError, VariantTicket},
    store::CatalogStore,
    variants::Variant,
};

use crate::{
    admin::{self, AdminFlow, Mutation, MutationOutcome},
    api::{ApiError, CatalogApi},
    loader,
};

const BROWSE_KINDS: [EntityKind; 3] = [
    EntityKind::Collection,
    EntityKind::Product,
    EntityKind::Variant,
];

struct InFlight {
    ticket: VariantTicket,
    handle: JoinHandle<Result<Vec<Variant>, ApiError>>,
}

/// Public catalog browsing session.
pub struct CatalogBrowser {
    api: Arc<dyn CatalogApi>,
    store: CatalogStore,
    controller: SelectionController,
    lightbox: Lightbox,
    in_flight: Option<InFlight>,
    page_size: u32,
}

impl Debug for CatalogBrowser {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CatalogBrowser")
            .field("store", &self.store)
            .field("controller", &self.controller)
            .field("lightbox", &self.lightbox)
            .field("in_flight", &self.in_flight.as_ref().map(|in_flight| in_flight.ticket))
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl CatalogBrowser {
    #[must_use]
    pub fn new(api: Arc<dyn CatalogApi>, page_size: u32) -> Self {
        Self {
            api,
            store: CatalogStore::new(),
            controller: SelectionController::new(),
            lightbox: Lightbox::default(),
            in_flight: None,
            page_size,
        }
    }

    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.controller.state()
    }

    #[must_use]
    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    /// Load the first page of every entity type and the full browse set.
    ///
    /// # Errors
    ///
    /// Returns the first API error; data loaded before it stays in the store.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        for kind in EntityKind::ALL {
            let request = PageRequest::new(1, self.page_size);

            loader::load_page(self.api.as_ref(), &mut self.store, kind, request).await?;
        }

        for kind in BROWSE_KINDS {
            loader::load_browse_set(self.api.as_ref(), &mut self.store, kind).await?;
        }

        self.browse_set_changed();

        Ok(())
    }

    /// Move the cached page of `kind` to `page`, keeping its search term.
    ///
    /// # Errors
    ///
    /// Returns the API error when the page cannot be fetched.
    pub async fn goto_page(&mut self, kind: EntityKind, page: u32) -> Result<(), ApiError> {
        let request = self.store.request(kind).at_page(page);

        loader::load_page(self.api.as_ref(), &mut self.store, kind, request).await
    }

    /// Filter the `kind` page by name, starting again from the first page.
    ///
    /// # Errors
    ///
    /// Returns the API error when the page cannot be fetched.
    pub async fn search(&mut self, kind: EntityKind, term: Option<&str>) -> Result<(), ApiError> {
        let request = PageRequest::new(1, self.page_size).with_search(term);

        loader::load_page(self.api.as_ref(), &mut self.store, kind, request).await
    }

    /// Pick a collection; its first active product is picked with it.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownCollection`] for ids not in the store.
    pub fn select_collection(&mut self, collection: CollectionId) -> Result<(), SelectionError> {
        let ticket = self.controller.select_collection(collection, &self.store)?;

        self.lightbox = Lightbox::default();
        self.dispatch(ticket);

        Ok(())
    }

    /// Pick a product of the selected collection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::ProductNotSelectable`] when the product is not
    /// an active product of the selected collection.
    pub fn select_product(&mut self, product: ProductId) -> Result<(), SelectionError> {
        let ticket = self.controller.select_product(product)?;

        self.lightbox = Lightbox::default();
        self.dispatch(Some(ticket));

        Ok(())
    }

    /// Wait for the outstanding variant fetch and offer it to the controller.
    ///
    /// Returns `None` when nothing was in flight.
    pub async fn settle(&mut self) -> Option<Resolution> {
        let InFlight { ticket, handle } = self.in_flight.take()?;

        let result = match handle.await {
            Ok(result) => result.map_err(|error| error.to_string()),
            Err(error) if error.is_cancelled() => return Some(Resolution::Stale),
            Err(error) => Err(format!("variant fetch failed: {error}")),
        };

        let resolution = self.controller.resolve(ticket, result);

        if resolution == Resolution::Applied {
            self.lightbox
                .replace_variants(self.controller.variants().unwrap_or_default());
        }

        Some(resolution)
    }

    /// Run an admin write through `flow`.
    ///
    /// A confirmed write refetches the affected browse sets. The selection is
    /// re-derived only when products or variants changed.
    pub async fn apply(&mut self, flow: &mut AdminFlow, mutation: Mutation) -> MutationOutcome {
        let kinds = admin::affected_kinds(mutation.kind());
        let outcome = flow.run(mutation, &mut self.store).await;

        if !outcome.is_confirmed() {
            return outcome;
        }

        for &kind in kinds {
            if let Err(error) =
                loader::load_browse_set(self.api.as_ref(), &mut self.store, kind).await
            {
                warn!(%kind, error = %error, "failed to reload browse set after mutation");
            }
        }

        if kinds
            .iter()
            .any(|kind| matches!(kind, EntityKind::Product | EntityKind::Variant))
        {
            self.browse_set_changed();
        }

        outcome
    }

    /// Re-derive the selection and lightbox from the browse set.
    fn browse_set_changed(&mut self) {
        let previous = self.controller.selected_product();

        let ticket = match self.controller.refresh(&self.store) {
            Ok(ticket) => ticket,
            Err(error) => {
                warn!(error = %error, "selection no longer valid");
                self.controller.clear();
                None
            }
        };

        match self.controller.selected_product() {
            Some(product) if Some(product) == previous => {
                let variants: Vec<Variant> = self
                    .store
                    .variants_for(product)
                    .into_iter()
                    .cloned()
                    .collect();

                self.lightbox.replace_variants(&variants);
            }
            _ => self.lightbox = Lightbox::default(),
        }

        self.dispatch(ticket);
    }

    fn dispatch(&mut self, ticket: Option<VariantTicket>) {
        if let Some(previous) = self.in_flight.take() {
            debug!(
                sequence = previous.ticket.sequence(),
                "aborting superseded variant fetch"
            );

            previous.handle.abort();
        }

        let Some(ticket) = ticket else {
            return;
        };

        let api = Arc::clone(&self.api);
        let handle =
            tokio::spawn(async move { api.variants_for_product(ticket.product()).await });

        self.in_flight = Some(InFlight { ticket, handle });
    }
}

impl Drop for CatalogBrowser {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use quarry::{
        collections::Collection,
        gallery::GalleryImageId,
        pagination::{Page, paginate},
        products::Product,
        selection::VariantsState,
        variants::VariantId,
    };
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        admin::MutationFailure,
        api::MockCatalogApi,
        session::Session,
    };

    use super::*;

    fn product(id: i64, collection: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            collection_id: CollectionId::new(collection),
            collection_name: None,
            image_url: format!("/products/{id}.png"),
        }
    }

    fn variant(id: i64, product: i64) -> Variant {
        Variant {
            id: VariantId::new(id),
            product_id: ProductId::new(product),
            name: format!("Variant {id}"),
            images: smallvec![format!("/variants/{id}.png")],
        }
    }

    /// Marble holds products 10 and 11, each with one imaged variant.
    fn catalog_api(variants: Vec<Variant>) -> MockCatalogApi {
        let mut api = MockCatalogApi::new();

        api.expect_list_collections().returning(|request| {
            let collections = vec![Collection {
                id: CollectionId::new(1),
                name: "Marble".to_string(),
            }];

            Ok(Page::new(collections, &request, 1))
        });
        api.expect_list_products().returning(|request| {
            Ok(Page::new(vec![product(10, 1), product(11, 1)], &request, 2))
        });
        api.expect_list_variants().returning(move |request| {
            let total = variants.len() as u64;

            Ok(Page::new(variants.clone(), &request, total))
        });
        api.expect_list_gallery()
            .returning(|request, _| Ok(Page::empty(&request)));

        api
    }

    #[tokio::test]
    async fn selecting_a_collection_loads_its_first_product() -> TestResult {
        let mut api = catalog_api(vec![variant(100, 10), variant(110, 11)]);

        api.expect_variants_for_product()
            .once()
            .withf(|product| *product == ProductId::new(10))
            .return_once(|_| Ok(vec![variant(100, 10)]));

        let mut browser = CatalogBrowser::new(Arc::new(api), 10);

        browser.load().await?;
        browser.select_collection(CollectionId::new(1))?;

        assert_eq!(browser.settle().await, Some(Resolution::Applied));
        assert_eq!(browser.controller().variants(), Some(&[variant(100, 10)][..]));
        assert_eq!(browser.lightbox().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn switching_products_shows_the_latest_selection() -> TestResult {
        let mut api = catalog_api(vec![variant(100, 10), variant(110, 11)]);

        // The first fetch may or may not start before it is aborted.
        api.expect_variants_for_product()
            .times(0..=1)
            .withf(|product| *product == ProductId::new(10))
            .returning(|_| Ok(vec![variant(100, 10)]));
        api.expect_variants_for_product()
            .once()
            .withf(|product| *product == ProductId::new(11))
            .return_once(|_| Ok(vec![variant(110, 11)]));

        let mut browser = CatalogBrowser::new(Arc::new(api), 10);

        browser.load().await?;
        browser.select_collection(CollectionId::new(1))?;
        browser.select_product(ProductId::new(11))?;

        assert_eq!(browser.settle().await, Some(Resolution::Applied));
        assert_eq!(browser.controller().selected_product(), Some(ProductId::new(11)));
        assert_eq!(browser.controller().variants(), Some(&[variant(110, 11)][..]));
        assert_eq!(browser.settle().await, None, "only one fetch is tracked");

        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_lands_in_failed_state() -> TestResult {
        let mut api = catalog_api(vec![variant(100, 10)]);

        api.expect_variants_for_product()
            .once()
            .return_once(|_| Err(ApiError::NotFound("Product not found".to_string())));

        let mut browser = CatalogBrowser::new(Arc::new(api), 10);

        browser.load().await?;
        browser.select_collection(CollectionId::new(1))?;
        browser.settle().await;

        assert!(
            matches!(
                browser.selection(),
                Selection::ProductSelected {
                    variants: VariantsState::Failed(_),
                    ..
                }
            ),
            "fetch error should be visible as a failed load"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleting_the_open_variant_closes_the_lightbox() -> TestResult {
        let mut api = MockCatalogApi::new();
        let deleted = Arc::new(AtomicBool::new(false));
        let deleted_by_api = Arc::clone(&deleted);

        api.expect_list_collections().returning(|request| {
            let collections = vec![Collection {
                id: CollectionId::new(1),
                name: "Marble".to_string(),
            }];

            Ok(Page::new(collections, &request, 1))
        });
        api.expect_list_products()
            .returning(|request| Ok(Page::new(vec![product(10, 1)], &request, 1)));
        api.expect_list_variants().returning(move |request| {
            if deleted.load(Ordering::SeqCst) {
                Ok(Page::empty(&request))
            } else {
                Ok(Page::new(vec![variant(100, 10)], &request, 1))
            }
        });
        api.expect_list_gallery()
            .returning(|request, _| Ok(Page::empty(&request)));
        api.expect_variants_for_product()
            .once()
            .return_once(|_| Ok(vec![variant(100, 10)]));
        api.expect_delete_variant()
            .once()
            .withf(|_, id| *id == VariantId::new(100))
            .return_once(move |_, _| {
                deleted_by_api.store(true, Ordering::SeqCst);
                Ok(())
            });

        let api: Arc<dyn CatalogApi> = Arc::new(api);
        let mut browser = CatalogBrowser::new(Arc::clone(&api), 10);
        let mut flow = AdminFlow::new(api, Some(Session::from_token("qa_token")));

        browser.load().await?;
        browser.select_collection(CollectionId::new(1))?;
        browser.settle().await;
        browser.lightbox_mut().open(0);

        assert!(browser.lightbox().is_open(), "image should be showing");

        let outcome = browser
            .apply(&mut flow, Mutation::DeleteVariant(VariantId::new(100)))
            .await;

        assert!(outcome.is_confirmed(), "delete should succeed");
        assert!(!browser.lightbox().is_open(), "lightbox should close");
        assert_eq!(
            browser.selection(),
            &Selection::CollectionSelected {
                collection: CollectionId::new(1),
                no_products: true
            }
        );
        assert_eq!(browser.settle().await, None, "no product left to fetch");

        Ok(())
    }

    #[tokio::test]
    async fn rejected_mutation_leaves_the_selection_alone() -> TestResult {
        let mut api = catalog_api(vec![variant(100, 10)]);

        api.expect_variants_for_product()
            .once()
            .return_once(|_| Ok(vec![variant(100, 10)]));
        api.expect_delete_product()
            .once()
            .return_once(|_, _| Err(ApiError::Conflict("Product has variants".to_string())));

        let api: Arc<dyn CatalogApi> = Arc::new(api);
        let mut browser = CatalogBrowser::new(Arc::clone(&api), 10);
        let mut flow = AdminFlow::new(api, Some(Session::from_token("qa_token")));

        browser.load().await?;
        browser.select_collection(CollectionId::new(1))?;
        browser.settle().await;

        let outcome = browser
            .apply(&mut flow, Mutation::DeleteProduct(ProductId::new(10)))
            .await;

        assert_eq!(
            outcome,
            MutationOutcome::Failed(MutationFailure::Conflict("Product has variants".to_string()))
        );
        assert_eq!(browser.controller().selected_product(), Some(ProductId::new(10)));

        Ok(())
    }

    #[tokio::test]
    async fn active_products_span_every_variant_page() -> TestResult {
        let mut api = MockCatalogApi::new();

        // Product 10 fills more than one full page before product 11's only
        // imaged variant shows up.
        let mut variants: Vec<Variant> = (1..=105).map(|id| variant(id, 10)).collect();
        variants.push(variant(200, 11));

        api.expect_list_collections().returning(|request| {
            let collections = vec![Collection {
                id: CollectionId::new(1),
                name: "Marble".to_string(),
            }];

            Ok(Page::new(collections, &request, 1))
        });
        api.expect_list_products()
            .returning(|request| Ok(paginate(vec![product(10, 1), product(11, 1)], &request)));
        api.expect_list_variants()
            .returning(move |request| Ok(paginate(variants.clone(), &request)));
        api.expect_list_gallery()
            .returning(|request, _| Ok(Page::empty(&request)));
        api.expect_variants_for_product()
            .times(0..=1)
            .withf(|product| *product == ProductId::new(10))
            .returning(|_| Ok(vec![variant(1, 10)]));
        api.expect_variants_for_product()
            .once()
            .withf(|product| *product == ProductId::new(11))
            .return_once(|_| Ok(vec![variant(200, 11)]));

        let mut browser = CatalogBrowser::new(Arc::new(api), 10);

        browser.load().await?;

        assert_eq!(browser.store().variants().count(), 10, "paged view holds one page");

        browser.select_collection(CollectionId::new(1))?;

        assert_eq!(
            browser.controller().active_products(),
            &[ProductId::new(10), ProductId::new(11)]
        );

        browser.select_product(ProductId::new(11))?;

        assert_eq!(browser.settle().await, Some(Resolution::Applied));
        assert_eq!(browser.controller().variants(), Some(&[variant(200, 11)][..]));

        Ok(())
    }

    #[tokio::test]
    async fn paging_and_gallery_writes_leave_the_selection_alone() -> TestResult {
        let mut api = catalog_api(vec![variant(100, 10), variant(110, 11)]);

        api.expect_variants_for_product()
            .once()
            .withf(|product| *product == ProductId::new(10))
            .return_once(|_| Ok(vec![variant(100, 10)]));
        api.expect_delete_gallery_image()
            .once()
            .return_once(|_, _| Ok(()));

        let api: Arc<dyn CatalogApi> = Arc::new(api);
        let mut browser = CatalogBrowser::new(Arc::clone(&api), 10);
        let mut flow = AdminFlow::new(api, Some(Session::from_token("qa_token")));

        browser.load().await?;
        browser.select_collection(CollectionId::new(1))?;
        browser.settle().await;
        browser.lightbox_mut().open(0);

        browser.goto_page(EntityKind::Product, 2).await?;
        browser.search(EntityKind::Variant, Some("slab")).await?;
        browser.goto_page(EntityKind::GalleryImage, 3).await?;

        let outcome = browser
            .apply(&mut flow, Mutation::DeleteGalleryImage(GalleryImageId::new(7)))
            .await;

        assert!(outcome.is_confirmed(), "gallery delete should succeed");
        assert_eq!(browser.settle().await, None, "no variant refetch was issued");
        assert_eq!(browser.controller().variants(), Some(&[variant(100, 10)][..]));
        assert!(browser.lightbox().is_open(), "lightbox stays on the open image");

        Ok(())
    }
}
