use std::sync::Arc;

use clap::Args;

use quarry::{
    collections::CollectionId, entity::EntityKind, gallery::GalleryImageId, products::ProductId,
    store::CatalogStore, variants::VariantId,
};
use quarry_client::{
    admin::{AdminFlow, Mutation, MutationOutcome},
    config::ClientConfig,
};

use super::Kind;

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// Entity type to delete
    kind: Kind,

    /// Entity id
    id: i64,
}

impl DeleteArgs {
    fn mutation(&self) -> Mutation {
        match EntityKind::from(self.kind) {
            EntityKind::Collection => Mutation::DeleteCollection(CollectionId::new(self.id)),
            EntityKind::Product => Mutation::DeleteProduct(ProductId::new(self.id)),
            EntityKind::Variant => Mutation::DeleteVariant(VariantId::new(self.id)),
            EntityKind::GalleryImage => Mutation::DeleteGalleryImage(GalleryImageId::new(self.id)),
        }
    }
}

pub(crate) async fn run(config: &ClientConfig, args: DeleteArgs) -> Result<(), String> {
    let session = config
        .session()
        .ok_or("QUARRY_TOKEN is not set; run `quarry login` first")?;

    let api = config
        .api()
        .map_err(|error| format!("failed to build client: {error}"))?;

    let mut flow = AdminFlow::new(Arc::new(api), Some(session));
    let mut store = CatalogStore::new();

    match flow.run(args.mutation(), &mut store).await {
        MutationOutcome::Confirmed(_) => {
            println!("deleted {} {}", EntityKind::from(args.kind), args.id);
            Ok(())
        }
        MutationOutcome::Failed(failure) => Err(format!("delete failed: {failure}")),
    }
}
