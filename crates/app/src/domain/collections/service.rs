//! Collections service.

use async_trait::async_trait;
use mockall::automock;
use quarry::{
    collections::{Collection, CollectionId, CollectionUpdate, NewCollection},
    pagination::{Page, PageRequest},
};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        collections::repository::PgCollectionsRepository, errors::CatalogServiceError,
        paging::PageWindow,
    },
};

#[derive(Debug, Clone)]
pub struct PgCollectionsService {
    db: Db,
    repository: PgCollectionsRepository,
}

impl PgCollectionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCollectionsRepository::new(),
        }
    }
}

#[async_trait]
impl CollectionsService for PgCollectionsService {
    async fn list_collections(
        &self,
        request: PageRequest,
    ) -> Result<Page<Collection>, CatalogServiceError> {
        let window = PageWindow::new(&request)?;
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_collections(&mut tx, &window).await?;
        let collections = self.repository.list_collections(&mut tx, &window).await?;

        tx.commit().await?;

        debug!(total, page = request.page, "listed collections");

        Ok(Page::new(collections, &request, total))
    }

    async fn get_collection(
        &self,
        collection: CollectionId,
    ) -> Result<Collection, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let collection = self.repository.get_collection(&mut tx, collection).await?;

        tx.commit().await?;

        Ok(collection)
    }

    async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<Collection, CatalogServiceError> {
        let collection = collection.validated()?;
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_collection(&mut tx, &collection.name)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_collection(
        &self,
        collection: CollectionId,
        update: CollectionUpdate,
    ) -> Result<Collection, CatalogServiceError> {
        let update = update.validated()?;
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_collection(&mut tx, collection, &update.name)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_collection(&self, collection: CollectionId) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_collection(&mut tx, collection)
            .await
            .map_err(CatalogServiceError::on_delete)?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CollectionsService: Send + Sync {
    /// Retrieve one page of collections, ordered by id.
    async fn list_collections(
        &self,
        request: PageRequest,
    ) -> Result<Page<Collection>, CatalogServiceError>;

    /// Retrieve a single collection.
    async fn get_collection(
        &self,
        collection: CollectionId,
    ) -> Result<Collection, CatalogServiceError>;

    /// Create a collection with a unique name.
    async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<Collection, CatalogServiceError>;

    /// Rename a collection.
    async fn update_collection(
        &self,
        collection: CollectionId,
        update: CollectionUpdate,
    ) -> Result<Collection, CatalogServiceError>;

    /// Delete a collection that no product belongs to.
    async fn delete_collection(&self, collection: CollectionId) -> Result<(), CatalogServiceError>;
}
