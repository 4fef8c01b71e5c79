//! Gallery service.

use async_trait::async_trait;
use mockall::automock;
use quarry::{
    gallery::{GalleryImage, GalleryImageId, GalleryImageUpdate, NewGalleryImage},
    pagination::{Page, PageRequest},
};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        errors::CatalogServiceError, gallery::repository::PgGalleryRepository,
        paging::PageWindow,
    },
};

#[derive(Debug, Clone)]
pub struct PgGalleryService {
    db: Db,
    repository: PgGalleryRepository,
}

impl PgGalleryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgGalleryRepository::new(),
        }
    }
}

#[async_trait]
impl GalleryService for PgGalleryService {
    async fn list_gallery_images(
        &self,
        request: PageRequest,
        category: Option<String>,
    ) -> Result<Page<GalleryImage>, CatalogServiceError> {
        let window = PageWindow::new(&request)?;
        let category = category.filter(|c| !c.trim().is_empty());
        let mut tx = self.db.begin().await?;

        let total = self
            .repository
            .count_gallery_images(&mut tx, &window, category.as_deref())
            .await?;

        let images = self
            .repository
            .list_gallery_images(&mut tx, &window, category.as_deref())
            .await?;

        tx.commit().await?;

        debug!(total, page = request.page, ?category, "listed gallery images");

        Ok(Page::new(images, &request, total))
    }

    async fn get_gallery_image(
        &self,
        image: GalleryImageId,
    ) -> Result<GalleryImage, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let image = self.repository.get_gallery_image(&mut tx, image).await?;

        tx.commit().await?;

        Ok(image)
    }

    async fn create_gallery_image(
        &self,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, CatalogServiceError> {
        let image = image.validated()?;
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_gallery_image(&mut tx, &image).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_gallery_image(
        &self,
        image: GalleryImageId,
        update: GalleryImageUpdate,
    ) -> Result<GalleryImage, CatalogServiceError> {
        let update = update.validated()?;
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_gallery_image(&mut tx, image, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_gallery_image(&self, image: GalleryImageId) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_gallery_image(&mut tx, image).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait GalleryService: Send + Sync {
    /// Retrieve one page of gallery images, optionally limited to a category.
    async fn list_gallery_images(
        &self,
        request: PageRequest,
        category: Option<String>,
    ) -> Result<Page<GalleryImage>, CatalogServiceError>;

    async fn get_gallery_image(
        &self,
        image: GalleryImageId,
    ) -> Result<GalleryImage, CatalogServiceError>;

    async fn create_gallery_image(
        &self,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, CatalogServiceError>;

    async fn update_gallery_image(
        &self,
        image: GalleryImageId,
        update: GalleryImageUpdate,
    ) -> Result<GalleryImage, CatalogServiceError>;

    async fn delete_gallery_image(&self, image: GalleryImageId) -> Result<(), CatalogServiceError>;
}
