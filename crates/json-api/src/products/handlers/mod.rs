//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use quarry::{
        collections::CollectionId,
        products::{Product, ProductId},
    };

    pub(super) fn make_product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            collection_id: CollectionId::new(1),
            collection_name: Some("Marble".to_string()),
            image_url: format!("/uploads/products/{id}.jpg"),
        }
    }
}
