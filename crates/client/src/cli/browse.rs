use std::sync::Arc;

use clap::Args;

use quarry::{
    collections::CollectionId,
    products::ProductId,
    selection::{Selection, VariantsState},
};
use quarry_client::{browser::CatalogBrowser, config::ClientConfig};

#[derive(Debug, Args)]
pub(crate) struct BrowseArgs {
    /// Collection to open
    #[arg(long)]
    collection: Option<i64>,

    /// Product to open within the collection
    #[arg(long, requires = "collection")]
    product: Option<i64>,
}

pub(crate) async fn run(config: &ClientConfig, args: BrowseArgs) -> Result<(), String> {
    let api = config
        .api()
        .map_err(|error| format!("failed to build client: {error}"))?;

    let mut browser = CatalogBrowser::new(Arc::new(api), config.page_size);

    browser
        .load()
        .await
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let Some(collection) = args.collection.map(CollectionId::new) else {
        print_collections(&browser);
        return Ok(());
    };

    browser
        .select_collection(collection)
        .map_err(|error| error.to_string())?;

    if let Some(product) = args.product.map(ProductId::new) {
        browser
            .select_product(product)
            .map_err(|error| error.to_string())?;
    }

    browser.settle().await;

    print_selection(&browser);

    Ok(())
}

fn print_collections(browser: &CatalogBrowser) {
    let store = browser.store();
    let collections = store.browsable_collections();

    if collections.is_empty() {
        println!("no collections with imaged products");
        return;
    }

    for collection in collections {
        println!("{}\t{}", collection.id, collection.name);

        for product in store.active_products_in(collection.id) {
            println!("  {}\t{}", product.id, product.name);
        }
    }
}

fn print_selection(browser: &CatalogBrowser) {
    let store = browser.store();

    match browser.selection() {
        Selection::NoCollectionSelected => println!("nothing selected"),
        Selection::CollectionSelected { collection, .. } => {
            println!("collection {collection} has no products with images");
        }
        Selection::ProductSelected {
            product, variants, ..
        } => {
            let name = store
                .browse_product(*product)
                .map_or("unknown product", |product| product.name.as_str());

            println!("{product}\t{name}");

            match variants {
                VariantsState::Loading => println!("  variants still loading"),
                VariantsState::Failed(reason) => println!("  failed to load variants: {reason}"),
                VariantsState::Loaded(variants) if variants.is_empty() => {
                    println!("  no variants");
                }
                VariantsState::Loaded(_) => {
                    for (index, image) in browser.lightbox().images().iter().enumerate() {
                        println!("  [{index}] variant {}\t{}", image.variant, image.url);
                    }
                }
            }
        }
    }
}
