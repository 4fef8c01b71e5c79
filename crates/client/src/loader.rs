use std::future::Future;

use tracing::debug;

use quarry::{
    entity::EntityKind,
    pagination::{MAX_PAGE_SIZE, Page, PageRequest},
    store::CatalogStore,
};

use crate::api::{ApiError, CatalogApi};

/// Fetch one page of `kind` and swap it into the store.
pub(crate) async fn load_page(
    api: &dyn CatalogApi,
    store: &mut CatalogStore,
    kind: EntityKind,
    request: PageRequest,
) -> Result<(), ApiError> {
    debug!(%kind, page = request.page, limit = request.limit, "loading page");

    match kind {
        EntityKind::Collection => {
            let page = api.list_collections(request.clone()).await?;
            store.replace_collections(page, request);
        }
        EntityKind::Product => {
            let page = api.list_products(request.clone()).await?;
            store.replace_products(page, request);
        }
        EntityKind::Variant => {
            let page = api.list_variants(request.clone()).await?;
            store.replace_variants(page, request);
        }
        EntityKind::GalleryImage => {
            let page = api.list_gallery(request.clone(), None).await?;
            store.replace_gallery(page, request);
        }
    }

    Ok(())
}

/// Reload the page the store currently holds for `kind`.
pub(crate) async fn reload(
    api: &dyn CatalogApi,
    store: &mut CatalogStore,
    kind: EntityKind,
) -> Result<(), ApiError> {
    let request = store.request(kind).clone();

    load_page(api, store, kind, request).await
}

/// Fetch every page of `kind` into the store's browse set.
///
/// Gallery images play no part in browsing and are skipped.
pub(crate) async fn load_browse_set(
    api: &dyn CatalogApi,
    store: &mut CatalogStore,
    kind: EntityKind,
) -> Result<(), ApiError> {
    match kind {
        EntityKind::Collection => {
            let all = walk_pages(kind, move |request| api.list_collections(request)).await?;
            store.replace_all_collections(all);
        }
        EntityKind::Product => {
            let all = walk_pages(kind, move |request| api.list_products(request)).await?;
            store.replace_all_products(all);
        }
        EntityKind::Variant => {
            let all = walk_pages(kind, move |request| api.list_variants(request)).await?;
            store.replace_all_variants(all);
        }
        EntityKind::GalleryImage => {}
    }

    Ok(())
}

async fn walk_pages<T, F, Fut>(kind: EntityKind, mut fetch: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let batch = fetch(PageRequest::new(page, MAX_PAGE_SIZE)).await?;
        let more = batch.pagination.has_next();

        all.extend(batch.data);

        if !more {
            break;
        }

        page += 1;
    }

    debug!(%kind, count = all.len(), pages = page, "loaded browse set");

    Ok(all)
}
