//! Catalog API client

mod dto;
mod errors;
mod http;

use async_trait::async_trait;
use mockall::automock;

use quarry::{
    collections::{Collection, CollectionId, CollectionUpdate, NewCollection},
    gallery::{GalleryImage, GalleryImageId, GalleryImageUpdate, NewGalleryImage},
    pagination::{Page, PageRequest},
    products::{NewProduct, Product, ProductId, ProductUpdate},
    variants::{NewVariant, Variant, VariantId, VariantUpdate},
};

use crate::session::Session;

pub use errors::ApiError;
pub use http::HttpCatalogApi;

/// The admin account a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProfile {
    pub uuid: String,
    pub username: String,
}

/// One method per REST operation of the catalog API.
///
/// Reads are public; writes carry the admin [`Session`].
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_collections(&self, request: PageRequest) -> Result<Page<Collection>, ApiError>;

    async fn get_collection(&self, collection: CollectionId) -> Result<Collection, ApiError>;

    async fn list_products(&self, request: PageRequest) -> Result<Page<Product>, ApiError>;

    async fn get_product(&self, product: ProductId) -> Result<Product, ApiError>;

    async fn list_variants(&self, request: PageRequest) -> Result<Page<Variant>, ApiError>;

    async fn get_variant(&self, variant: VariantId) -> Result<Variant, ApiError>;

    /// Every variant of one product, unpaginated.
    async fn variants_for_product(&self, product: ProductId) -> Result<Vec<Variant>, ApiError>;

    async fn list_gallery(
        &self,
        request: PageRequest,
        category: Option<String>,
    ) -> Result<Page<GalleryImage>, ApiError>;

    async fn get_gallery_image(&self, image: GalleryImageId) -> Result<GalleryImage, ApiError>;

    /// Exchange credentials for a session.
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError>;

    async fn me(&self, session: &Session) -> Result<AdminProfile, ApiError>;

    async fn create_collection(
        &self,
        session: &Session,
        collection: NewCollection,
    ) -> Result<Collection, ApiError>;

    async fn update_collection(
        &self,
        session: &Session,
        collection: CollectionId,
        update: CollectionUpdate,
    ) -> Result<Collection, ApiError>;

    async fn delete_collection(
        &self,
        session: &Session,
        collection: CollectionId,
    ) -> Result<(), ApiError>;

    async fn create_product(
        &self,
        session: &Session,
        product: NewProduct,
    ) -> Result<Product, ApiError>;

    async fn update_product(
        &self,
        session: &Session,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ApiError>;

    async fn delete_product(&self, session: &Session, product: ProductId) -> Result<(), ApiError>;

    async fn create_variant(
        &self,
        session: &Session,
        variant: NewVariant,
    ) -> Result<Variant, ApiError>;

    async fn update_variant(
        &self,
        session: &Session,
        variant: VariantId,
        update: VariantUpdate,
    ) -> Result<Variant, ApiError>;

    async fn delete_variant(&self, session: &Session, variant: VariantId) -> Result<(), ApiError>;

    async fn create_gallery_image(
        &self,
        session: &Session,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, ApiError>;

    async fn update_gallery_image(
        &self,
        session: &Session,
        image: GalleryImageId,
        update: GalleryImageUpdate,
    ) -> Result<GalleryImage, ApiError>;

    async fn delete_gallery_image(
        &self,
        session: &Session,
        image: GalleryImageId,
    ) -> Result<(), ApiError>;
}
