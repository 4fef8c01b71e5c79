//! Integration tests walking the public catalog through its lifecycle.
//!
//! A single marble collection starts with one product and no variants, gains
//! an imaged variant, is browsed, and finally loses the variant while its image
//! is open in the lightbox.

use smallvec::smallvec;
use testresult::TestResult;

use quarry::prelude::*;

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

fn load<T: Entity>(items: Vec<T>) -> (Page<T>, PageRequest) {
    let request = PageRequest::new(1, MAX_PAGE_SIZE);

    (paginate(items, &request), request)
}

fn store_with(variants: Vec<Variant>) -> CatalogStore {
    let mut store = CatalogStore::new();

    let (page, request) = load(vec![marble()]);
    store.replace_collections(page, request);

    let (page, request) = load(vec![carrara()]);
    store.replace_products(page, request);

    let (page, request) = load(variants);
    store.replace_variants(page, request);

    store
}

#[test]
fn product_without_variants_hides_its_collection() {
    let store = store_with(Vec::new());

    assert!(store.active_products().is_empty(), "Carrara has no variants");
    assert!(
        store.browsable_collections().is_empty(),
        "Marble has no active products"
    );
}

#[test]
fn imaged_variant_makes_collection_browsable_and_auto_selects() -> TestResult {
    let store = store_with(vec![polished()]);

    let browsable: Vec<&str> = store
        .browsable_collections()
        .iter()
        .map(|c| c.name.as_str())
        .collect();

    assert_eq!(browsable, vec!["Marble"]);

    let mut controller = SelectionController::new();

    let ticket = controller
        .select_collection(CollectionId::new(1), &store)?
        .ok_or("selecting Marble should start a variant fetch")?;

    assert_eq!(ticket.product(), ProductId::new(10));

    let fetched = store
        .variants_for(ticket.product())
        .into_iter()
        .cloned()
        .collect();

    assert_eq!(controller.resolve(ticket, Ok(fetched)), Resolution::Applied);

    let loaded: Vec<i64> = controller
        .variants()
        .ok_or("variants should be loaded")?
        .iter()
        .map(|v| v.id.into_i64())
        .collect();

    assert_eq!(loaded, vec![100]);

    Ok(())
}

#[test]
fn page_past_the_end_is_empty_with_consistent_metadata() {
    let products: Vec<Product> = (1..=12)
        .map(|id| Product {
            id: ProductId::new(id),
            name: format!("Slab {id}"),
            ..carrara()
        })
        .collect();

    let page = paginate(products, &PageRequest::new(3, 10));

    assert!(page.data.is_empty(), "page 3 starts at item 21");
    assert_eq!(page.pagination.total, 12);
    assert_eq!(page.pagination.total_pages, 2);
}

#[test]
fn deleting_open_variant_closes_lightbox() -> TestResult {
    let mut store = store_with(vec![polished()]);
    let mut controller = SelectionController::new();

    let ticket = controller
        .select_collection(CollectionId::new(1), &store)?
        .ok_or("selecting Marble should start a variant fetch")?;
    controller.resolve(ticket, Ok(vec![polished()]));

    let mut lightbox = Lightbox::new(controller.variants().unwrap_or_default());

    assert!(lightbox.open(0).is_some(), "one image to show");

    // Admin deletes variant 100; the store is refetched without it.
    store.invalidate(EntityKind::Variant);
    let (page, request) = load(Vec::new());
    store.replace_variants(page, request);

    let refreshed = controller.refresh(&store)?;

    assert_eq!(refreshed, None, "Marble no longer has active products");

    lightbox.replace_variants(controller.variants().unwrap_or_default());

    assert!(!lightbox.is_open());
    assert_eq!(lightbox.next(), None);

    Ok(())
}
