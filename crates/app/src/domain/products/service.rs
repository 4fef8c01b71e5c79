//! Products service.

use async_trait::async_trait;
use mockall::automock;
use quarry::{
    pagination::{Page, PageRequest},
    products::{NewProduct, Product, ProductId, ProductUpdate},
};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        errors::CatalogServiceError, paging::PageWindow,
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, CatalogServiceError> {
        let window = PageWindow::new(&request)?;
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_products(&mut tx, &window).await?;
        let products = self.repository.list_products(&mut tx, &window).await?;

        tx.commit().await?;

        debug!(total, page = request.page, "listed products");

        Ok(Page::new(products, &request, total))
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let product = product.validated()?;
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError> {
        let update = update.validated()?;
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, product)
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
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of products with their collection names.
    async fn list_products(
        &self,
        request: PageRequest,
    ) -> Result<Page<Product>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, CatalogServiceError>;

    /// Create a product inside an existing collection.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Replace a product's fields.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError>;

    /// Delete a product that has no variants.
    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError>;
}
