use clap::Args;

use quarry::{entity::EntityKind, pagination::PageRequest};
use quarry_client::{
    api::{ApiError, CatalogApi},
    config::ClientConfig,
};

use super::Kind;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Entity type to list
    kind: Kind,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Case-insensitive name filter
    #[arg(long)]
    search: Option<String>,

    /// Gallery category filter
    #[arg(long)]
    category: Option<String>,
}

pub(crate) async fn run(config: &ClientConfig, args: ListArgs) -> Result<(), String> {
    let api = config
        .api()
        .map_err(|error| format!("failed to build client: {error}"))?;

    let kind = EntityKind::from(args.kind);
    let request = PageRequest::new(args.page, config.page_size).with_search(args.search);

    print_page(&api, kind, request, args.category)
        .await
        .map_err(|error| format!("failed to list {}: {error}", kind.resource()))
}

async fn print_page(
    api: &dyn CatalogApi,
    kind: EntityKind,
    request: PageRequest,
    category: Option<String>,
) -> Result<(), ApiError> {
    let pagination = match kind {
        EntityKind::Collection => {
            let page = api.list_collections(request).await?;
            for collection in &page.data {
                println!("{}\t{}", collection.id, collection.name);
            }
            page.pagination
        }
        EntityKind::Product => {
            let page = api.list_products(request).await?;
            for product in &page.data {
                println!(
                    "{}\t{}\tcollection {}",
                    product.id, product.name, product.collection_id
                );
            }
            page.pagination
        }
        EntityKind::Variant => {
            let page = api.list_variants(request).await?;
            for variant in &page.data {
                println!(
                    "{}\t{}\tproduct {}\t{} image(s)",
                    variant.id,
                    variant.name,
                    variant.product_id,
                    variant.images.len()
                );
            }
            page.pagination
        }
        EntityKind::GalleryImage => {
            let page = api.list_gallery(request, category).await?;
            for image in &page.data {
                println!(
                    "{}\t{}\t{}",
                    image.id,
                    image.title.as_deref().unwrap_or("-"),
                    image.image_url
                );
            }
            page.pagination
        }
    };

    if pagination.is_beyond_range() {
        println!("page {} is past the last page", pagination.page);
    }

    println!(
        "page {} of {} ({} total)",
        pagination.page, pagination.total_pages, pagination.total
    );

    Ok(())
}
