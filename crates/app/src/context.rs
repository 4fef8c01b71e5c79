//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        collections::{CollectionsService, PgCollectionsService},
        gallery::{GalleryService, PgGalleryService},
        products::{PgProductsService, ProductsService},
        variants::{PgVariantsService, VariantsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub collections: Arc<dyn CollectionsService>,
    pub products: Arc<dyn ProductsService>,
    pub variants: Arc<dyn VariantsService>,
    pub gallery: Arc<dyn GalleryService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        token_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            collections: Arc::new(PgCollectionsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            variants: Arc::new(PgVariantsService::new(db.clone())),
            gallery: Arc::new(PgGalleryService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, token_ttl)),
        })
    }
}
