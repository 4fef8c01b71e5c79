//! reqwest implementation of [`CatalogApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header::ACCEPT};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use quarry::{
    collections::{Collection, CollectionId, CollectionUpdate, NewCollection},
    gallery::{GalleryImage, GalleryImageId, GalleryImageUpdate, NewGalleryImage},
    pagination::{Page, PageRequest},
    products::{NewProduct, Product, ProductId, ProductUpdate},
    variants::{NewVariant, Variant, VariantId, VariantUpdate},
};

use crate::{
    api::{
        AdminProfile, ApiError, CatalogApi,
        dto::{
            AdminDto, AssetBase, CollectionDto, ErrorBodyDto, GalleryImageDto, IssuedTokenDto,
            LoginDto, ProductDto, VariantDto, VariantWriteDto,
        },
    },
    session::Session,
};

/// HTTP client for the catalog API.
///
/// Writes are sent as JSON bodies. Image fields carry URLs of images that are
/// already stored; this client never uploads files as multipart forms.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    base: String,
    assets: AssetBase,
    http: Client,
}

impl HttpCatalogApi {
    /// Create a client for the server at `base`, e.g. `http://localhost:8698`.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend cannot be initialised.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            assets: AssetBase::new(base),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base)
    }

    fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", request.page.to_string()),
            ("limit", request.limit.to_string()),
        ];

        if let Some(search) = request.search_term() {
            query.push(("search", search.to_string()));
        }

        query
    }

    async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBodyDto>(&text)
            .map(ErrorBodyDto::into_brief)
            .unwrap_or(text);

        debug!(%status, %message, "catalog api rejected request");

        Err(ApiError::from_status(status, message))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.header(ACCEPT, "application/json").send().await?;

        Ok(Self::ensure_ok(response).await?.json().await?)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.header(ACCEPT, "application/json").send().await?;

        Self::ensure_ok(response).await?;

        Ok(())
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        request: &PageRequest,
        extra: &[(&'static str, String)],
    ) -> Result<Page<T>, ApiError> {
        let mut query = Self::page_query(request);

        query.extend_from_slice(extra);

        self.fetch(self.http.get(self.url(resource)).query(&query))
            .await
    }

    fn write<B: Serialize + ?Sized>(
        &self,
        builder: RequestBuilder,
        session: &Session,
        body: &B,
    ) -> RequestBuilder {
        builder
            .bearer_auth(session.token())
            .json(body)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_collections(&self, request: PageRequest) -> Result<Page<Collection>, ApiError> {
        let page: Page<CollectionDto> = self.get_page("collections", &request, &[]).await?;

        Ok(page.map(Into::into))
    }

    async fn get_collection(&self, collection: CollectionId) -> Result<Collection, ApiError> {
        let dto: CollectionDto = self
            .fetch(self.http.get(self.url(&format!("collections/{collection}"))))
            .await?;

        Ok(dto.into())
    }

    async fn list_products(&self, request: PageRequest) -> Result<Page<Product>, ApiError> {
        let page: Page<ProductDto> = self.get_page("products", &request, &[]).await?;

        Ok(page.map(|dto| dto.into_model(&self.assets)))
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ApiError> {
        let dto: ProductDto = self
            .fetch(self.http.get(self.url(&format!("products/{product}"))))
            .await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn list_variants(&self, request: PageRequest) -> Result<Page<Variant>, ApiError> {
        let page: Page<VariantDto> = self.get_page("product-variants", &request, &[]).await?;

        Ok(page.map(|dto| dto.into_model(&self.assets)))
    }

    async fn get_variant(&self, variant: VariantId) -> Result<Variant, ApiError> {
        let dto: VariantDto = self
            .fetch(self.http.get(self.url(&format!("product-variants/{variant}"))))
            .await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn variants_for_product(&self, product: ProductId) -> Result<Vec<Variant>, ApiError> {
        let dtos: Vec<VariantDto> = self
            .fetch(
                self.http
                    .get(self.url(&format!("product-variants/product/{product}"))),
            )
            .await?;

        Ok(dtos
            .into_iter()
            .map(|dto| dto.into_model(&self.assets))
            .collect())
    }

    async fn list_gallery(
        &self,
        request: PageRequest,
        category: Option<String>,
    ) -> Result<Page<GalleryImage>, ApiError> {
        let extra: Vec<_> = category
            .into_iter()
            .map(|category| ("category", category))
            .collect();

        let page: Page<GalleryImageDto> = self.get_page("gallery", &request, &extra).await?;

        Ok(page.map(|dto| dto.into_model(&self.assets)))
    }

    async fn get_gallery_image(&self, image: GalleryImageId) -> Result<GalleryImage, ApiError> {
        let dto: GalleryImageDto = self
            .fetch(self.http.get(self.url(&format!("gallery/{image}"))))
            .await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let issued: IssuedTokenDto = self
            .fetch(
                self.http
                    .post(self.url("auth/login"))
                    .json(&LoginDto { username, password }),
            )
            .await?;

        let expires_at = issued.expires_at.parse().ok();

        Ok(Session::issued(issued.token, issued.username, expires_at))
    }

    async fn me(&self, session: &Session) -> Result<AdminProfile, ApiError> {
        let admin: AdminDto = self
            .fetch(
                self.http
                    .get(self.url("auth/me"))
                    .bearer_auth(session.token()),
            )
            .await?;

        Ok(AdminProfile {
            uuid: admin.uuid,
            username: admin.username,
        })
    }

    async fn create_collection(
        &self,
        session: &Session,
        collection: NewCollection,
    ) -> Result<Collection, ApiError> {
        let builder = self.http.post(self.url("collections"));
        let dto: CollectionDto = self.fetch(self.write(builder, session, &collection)).await?;

        Ok(dto.into())
    }

    async fn update_collection(
        &self,
        session: &Session,
        collection: CollectionId,
        update: CollectionUpdate,
    ) -> Result<Collection, ApiError> {
        let builder = self.http.put(self.url(&format!("collections/{collection}")));
        let dto: CollectionDto = self.fetch(self.write(builder, session, &update)).await?;

        Ok(dto.into())
    }

    async fn delete_collection(
        &self,
        session: &Session,
        collection: CollectionId,
    ) -> Result<(), ApiError> {
        self.execute(
            self.http
                .delete(self.url(&format!("collections/{collection}")))
                .bearer_auth(session.token()),
        )
        .await
    }

    async fn create_product(
        &self,
        session: &Session,
        product: NewProduct,
    ) -> Result<Product, ApiError> {
        let builder = self.http.post(self.url("products"));
        let dto: ProductDto = self.fetch(self.write(builder, session, &product)).await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn update_product(
        &self,
        session: &Session,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ApiError> {
        let builder = self.http.put(self.url(&format!("products/{product}")));
        let dto: ProductDto = self.fetch(self.write(builder, session, &update)).await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn delete_product(&self, session: &Session, product: ProductId) -> Result<(), ApiError> {
        self.execute(
            self.http
                .delete(self.url(&format!("products/{product}")))
                .bearer_auth(session.token()),
        )
        .await
    }

    async fn create_variant(
        &self,
        session: &Session,
        variant: NewVariant,
    ) -> Result<Variant, ApiError> {
        let builder = self.http.post(self.url("product-variants"));
        let body = VariantWriteDto::from(&variant);
        let dto: VariantDto = self.fetch(self.write(builder, session, &body)).await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn update_variant(
        &self,
        session: &Session,
        variant: VariantId,
        update: VariantUpdate,
    ) -> Result<Variant, ApiError> {
        let builder = self
            .http
            .put(self.url(&format!("product-variants/{variant}")));
        let body = VariantWriteDto::from(&update);
        let dto: VariantDto = self.fetch(self.write(builder, session, &body)).await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn delete_variant(&self, session: &Session, variant: VariantId) -> Result<(), ApiError> {
        self.execute(
            self.http
                .delete(self.url(&format!("product-variants/{variant}")))
                .bearer_auth(session.token()),
        )
        .await
    }

    async fn create_gallery_image(
        &self,
        session: &Session,
        image: NewGalleryImage,
    ) -> Result<GalleryImage, ApiError> {
        let builder = self.http.post(self.url("gallery"));
        let dto: GalleryImageDto = self.fetch(self.write(builder, session, &image)).await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn update_gallery_image(
        &self,
        session: &Session,
        image: GalleryImageId,
        update: GalleryImageUpdate,
    ) -> Result<GalleryImage, ApiError> {
        let builder = self.http.put(self.url(&format!("gallery/{image}")));
        let dto: GalleryImageDto = self.fetch(self.write(builder, session, &update)).await?;

        Ok(dto.into_model(&self.assets))
    }

    async fn delete_gallery_image(
        &self,
        session: &Session,
        image: GalleryImageId,
    ) -> Result<(), ApiError> {
        self.execute(
            self.http
                .delete(self.url(&format!("gallery/{image}")))
                .bearer_auth(session.token()),
        )
        .await
    }
}
