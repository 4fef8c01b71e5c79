//! Admin Mutation Flow
//!
//! Every edit goes through [`AdminFlow::run`]: validate locally, send, and on
//! success throw away the affected store pages and fetch them again. The store
//! is never patched from the write response, so what the browser shows is
//! always what the service last returned for a list request.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use jiff::Timestamp;
use thiserror::Error;
use tracing::{info, warn};

use quarry::{
    collections::{Collection, CollectionId, CollectionUpdate, NewCollection},
    entity::EntityKind,
    gallery::{GalleryImage, GalleryImageId, GalleryImageUpdate, NewGalleryImage},
    products::{NewProduct, Product, ProductId, ProductUpdate},
    store::CatalogStore,
    validation::ValidationError,
    variants::{NewVariant, Variant, VariantId, VariantUpdate},
};

use crate::{
    api::{ApiError, CatalogApi},
    loader,
    session::Session,
};

/// One admin write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateCollection(NewCollection),
    UpdateCollection(CollectionId, CollectionUpdate),
    DeleteCollection(CollectionId),
    CreateProduct(NewProduct),
    UpdateProduct(ProductId, ProductUpdate),
    DeleteProduct(ProductId),
    CreateVariant(NewVariant),
    UpdateVariant(VariantId, VariantUpdate),
    DeleteVariant(VariantId),
    CreateGalleryImage(NewGalleryImage),
    UpdateGalleryImage(GalleryImageId, GalleryImageUpdate),
    DeleteGalleryImage(GalleryImageId),
}

impl Mutation {
    /// Entity type the write touches.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::CreateCollection(_) | Self::UpdateCollection(..) | Self::DeleteCollection(_) => {
                EntityKind::Collection
            }
            Self::CreateProduct(_) | Self::UpdateProduct(..) | Self::DeleteProduct(_) => {
                EntityKind::Product
            }
            Self::CreateVariant(_) | Self::UpdateVariant(..) | Self::DeleteVariant(_) => {
                EntityKind::Variant
            }
            Self::CreateGalleryImage(_)
            | Self::UpdateGalleryImage(..)
            | Self::DeleteGalleryImage(_) => EntityKind::GalleryImage,
        }
    }

    /// Reject bad input before it reaches the network.
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::CreateCollection(data) | Self::UpdateCollection(_, data) => {
                data.validated().map(drop)
            }
            Self::CreateProduct(data) | Self::UpdateProduct(_, data) => data.validated().map(drop),
            Self::CreateVariant(data) | Self::UpdateVariant(_, data) => data.validated().map(drop),
            Self::CreateGalleryImage(data) | Self::UpdateGalleryImage(_, data) => {
                data.validated().map(drop)
            }
            Self::DeleteCollection(_)
            | Self::DeleteProduct(_)
            | Self::DeleteVariant(_)
            | Self::DeleteGalleryImage(_) => Ok(()),
        }
    }
}

/// What the service confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed {
    Collection(Collection),
    Product(Product),
    Variant(Variant),
    GalleryImage(GalleryImage),
    Deleted { kind: EntityKind, id: i64 },
}

/// Why a write did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationFailure {
    #[error("invalid input: {0}")]
    Validation(String),

    /// Duplicate name, or the entity still has children.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not signed in")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(String),
}

impl From<ApiError> for MutationFailure {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Validation(message) => Self::Validation(message),
            ApiError::Unauthorized => Self::Unauthorized,
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Conflict(message) => Self::Conflict(message),
            error @ (ApiError::Status { .. } | ApiError::Transport(_)) => {
                Self::Transport(error.to_string())
            }
        }
    }
}

impl From<ValidationError> for MutationFailure {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.to_string())
    }
}

/// Result of one [`AdminFlow::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Confirmed(Confirmed),
    Failed(MutationFailure),
}

impl MutationOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Progress of the most recent write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending(EntityKind),
    Confirmed(EntityKind),
    Failed(MutationFailure),
}

/// Sends admin writes and keeps the store honest afterwards.
pub struct AdminFlow {
    api: Arc<dyn CatalogApi>,
    session: Option<Session>,
    state: MutationState,
}

impl Debug for AdminFlow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdminFlow")
            .field("session", &self.session)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AdminFlow {
    #[must_use]
    pub fn new(api: Arc<dyn CatalogApi>, session: Option<Session>) -> Self {
        Self {
            api,
            session,
            state: MutationState::Idle,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// Sign in and keep the issued session.
    ///
    /// # Errors
    ///
    /// Returns the API error when the credentials are rejected or the request fails.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&Session, ApiError> {
        let session = self.api.login(username, password).await?;

        Ok(self.session.insert(session))
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Perform one write and refresh the store pages it affects.
    ///
    /// Failures are reported, never retried. A 401 or a locally expired
    /// session drops the session.
    pub async fn run(&mut self, mutation: Mutation, store: &mut CatalogStore) -> MutationOutcome {
        let kind = mutation.kind();

        self.state = MutationState::Pending(kind);

        match self.send(mutation).await {
            Ok(confirmed) => {
                info!(%kind, "mutation confirmed");

                self.state = MutationState::Confirmed(kind);
                self.refetch(kind, store).await;

                MutationOutcome::Confirmed(confirmed)
            }
            Err(failure) => {
                warn!(%kind, error = %failure, "mutation failed");

                if failure == MutationFailure::Unauthorized {
                    self.session = None;
                }

                self.state = MutationState::Failed(failure.clone());

                MutationOutcome::Failed(failure)
            }
        }
    }

    async fn send(&self, mutation: Mutation) -> Result<Confirmed, MutationFailure> {
        mutation.validate()?;

        let session = self
            .session
            .as_ref()
            .filter(|session| !session.is_expired_at(Timestamp::now()))
            .ok_or(MutationFailure::Unauthorized)?;
        let api = self.api.as_ref();

        let confirmed = match mutation {
            Mutation::CreateCollection(data) => {
                Confirmed::Collection(api.create_collection(session, data).await?)
            }
            Mutation::UpdateCollection(id, data) => {
                Confirmed::Collection(api.update_collection(session, id, data).await?)
            }
            Mutation::DeleteCollection(id) => {
                api.delete_collection(session, id).await?;
                Confirmed::Deleted {
                    kind: EntityKind::Collection,
                    id: id.into_i64(),
                }
            }
            Mutation::CreateProduct(data) => {
                Confirmed::Product(api.create_product(session, data).await?)
            }
            Mutation::UpdateProduct(id, data) => {
                Confirmed::Product(api.update_product(session, id, data).await?)
            }
            Mutation::DeleteProduct(id) => {
                api.delete_product(session, id).await?;
                Confirmed::Deleted {
                    kind: EntityKind::Product,
                    id: id.into_i64(),
                }
            }
            Mutation::CreateVariant(data) => {
                Confirmed::Variant(api.create_variant(session, data).await?)
            }
            Mutation::UpdateVariant(id, data) => {
                Confirmed::Variant(api.update_variant(session, id, data).await?)
            }
            Mutation::DeleteVariant(id) => {
                api.delete_variant(session, id).await?;
                Confirmed::Deleted {
                    kind: EntityKind::Variant,
                    id: id.into_i64(),
                }
            }
            Mutation::CreateGalleryImage(data) => {
                Confirmed::GalleryImage(api.create_gallery_image(session, data).await?)
            }
            Mutation::UpdateGalleryImage(id, data) => {
                Confirmed::GalleryImage(api.update_gallery_image(session, id, data).await?)
            }
            Mutation::DeleteGalleryImage(id) => {
                api.delete_gallery_image(session, id).await?;
                Confirmed::Deleted {
                    kind: EntityKind::GalleryImage,
                    id: id.into_i64(),
                }
            }
        };

        Ok(confirmed)
    }

    async fn refetch(&self, kind: EntityKind, store: &mut CatalogStore) {
        for &kind in affected_kinds(kind) {
            store.invalidate(kind);

            // The write already succeeded; a failed reload leaves the page
            // invalidated until the next load.
            if let Err(error) = loader::reload(self.api.as_ref(), store, kind).await {
                warn!(%kind, error = %error, "failed to reload page after mutation");
            }
        }
    }
}

/// Entity types whose cached data a confirmed write of `kind` invalidates.
///
/// Variant writes change which products are active, and product writes
/// cascade to their variants.
pub(crate) fn affected_kinds(kind: EntityKind) -> &'static [EntityKind] {
    match kind {
        EntityKind::Product | EntityKind::Variant => &[EntityKind::Product, EntityKind::Variant],
        EntityKind::Collection => &[EntityKind::Collection],
        EntityKind::GalleryImage => &[EntityKind::GalleryImage],
    }
}
