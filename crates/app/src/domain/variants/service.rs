//! Variants service.

use async_trait::async_trait;
use mockall::automock;
use quarry::{
    pagination::{Page, PageRequest},
    products::ProductId,
    variants::{NewVariant, VariantId, VariantUpdate},
};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        errors::CatalogServiceError,
        paging::PageWindow,
        variants::{VariantListing, repository::PgVariantsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgVariantsService {
    db: Db,
    repository: PgVariantsRepository,
}

impl PgVariantsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgVariantsRepository::new(),
        }
    }
}

#[async_trait]
impl VariantsService for PgVariantsService {
    async fn list_variants(
        &self,
        request: PageRequest,
    ) -> Result<Page<VariantListing>, CatalogServiceError> {
        let window = PageWindow::new(&request)?;
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_variants(&mut tx, &window).await?;
        let variants = self.repository.list_variants(&mut tx, &window).await?;

        tx.commit().await?;

        debug!(total, page = request.page, "listed variants");

        Ok(Page::new(variants, &request, total))
    }

    async fn get_variant(&self, variant: VariantId) -> Result<VariantListing, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let variant = self.repository.get_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn variants_for_product(
        &self,
        product: ProductId,
    ) -> Result<Vec<VariantListing>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let variants = self
            .repository
            .list_product_variants(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(variants)
    }

    async fn create_variant(
        &self,
        variant: NewVariant,
    ) -> Result<VariantListing, CatalogServiceError> {
        let variant = variant.validated()?;
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_variant(&mut tx, &variant).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_variant(
        &self,
        variant: VariantId,
        update: VariantUpdate,
    ) -> Result<VariantListing, CatalogServiceError> {
        let update = update.validated()?;
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_variant(&mut tx, variant, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_variant(&self, variant: VariantId) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_variant(&mut tx, variant)
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
pub trait VariantsService: Send + Sync {
    /// Retrieve one page of variants across all products.
    async fn list_variants(
        &self,
        request: PageRequest,
    ) -> Result<Page<VariantListing>, CatalogServiceError>;

    /// Retrieve a single variant.
    async fn get_variant(&self, variant: VariantId) -> Result<VariantListing, CatalogServiceError>;

    /// Retrieve every variant of one product, ordered by id.
    ///
    /// An unknown product has no variants.
    async fn variants_for_product(
        &self,
        product: ProductId,
    ) -> Result<Vec<VariantListing>, CatalogServiceError>;

    async fn create_variant(
        &self,
        variant: NewVariant,
    ) -> Result<VariantListing, CatalogServiceError>;

    async fn update_variant(
        &self,
        variant: VariantId,
        update: VariantUpdate,
    ) -> Result<VariantListing, CatalogServiceError>;

    async fn delete_variant(&self, variant: VariantId) -> Result<(), CatalogServiceError>;
}
