//! Active-Set Filter
//!
//! A product is active when at least one of its variants has at least one
//! image. A collection is browsable when at least one of its products is
//! active. Public surfaces only ever show active products and browsable
//! collections.

use rustc_hash::FxHashSet;

use crate::{
    collections::{Collection, CollectionId},
    products::{Product, ProductId},
    variants::Variant,
};

/// Ids of every product that has an imaged variant.
pub fn imaged_product_ids<'v>(
    variants: impl IntoIterator<Item = &'v Variant>,
) -> FxHashSet<ProductId> {
    variants
        .into_iter()
        .filter(|variant| variant.has_images())
        .map(|variant| variant.product_id)
        .collect()
}

/// Products eligible for public display, ordered by id.
///
/// Duplicate products in the input appear once in the output.
pub fn active_products<'p, 'v>(
    products: impl IntoIterator<Item = &'p Product>,
    variants: impl IntoIterator<Item = &'v Variant>,
) -> Vec<&'p Product> {
    let imaged = imaged_product_ids(variants);

    let mut active: Vec<&Product> = products
        .into_iter()
        .filter(|product| imaged.contains(&product.id))
        .collect();

    active.sort_by_key(|product| product.id);
    active.dedup_by_key(|product| product.id);

    active
}

/// Collections with at least one active product, ordered by id.
pub fn browsable_collections<'c>(
    collections: impl IntoIterator<Item = &'c Collection>,
    active_products: &[&Product],
) -> Vec<&'c Collection> {
    let populated: FxHashSet<CollectionId> = active_products
        .iter()
        .map(|product| product.collection_id)
        .collect();

    let mut browsable: Vec<&Collection> = collections
        .into_iter()
        .filter(|collection| populated.contains(&collection.id))
        .collect();

    browsable.sort_by_key(|collection| collection.id);
    browsable.dedup_by_key(|collection| collection.id);

    browsable
}

/// Active products belonging to `collection`, ordered by id.
pub fn active_products_in<'p, 'v>(
    collection: CollectionId,
    products: impl IntoIterator<Item = &'p Product>,
    variants: impl IntoIterator<Item = &'v Variant>,
) -> Vec<&'p Product> {
    active_products(
        products
            .into_iter()
            .filter(|product| product.collection_id == collection),
        variants,
    )
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::variants::{VariantId, VariantImages};

    use super::*;

    fn collection(id: i64, name: &str) -> Collection {
        Collection {
            id: CollectionId::new(id),
            name: name.to_string(),
        }
    }

    fn product(id: i64, collection: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            collection_id: CollectionId::new(collection),
            collection_name: None,
            image_url: format!("/uploads/p{id}.png"),
        }
    }

    fn variant(id: i64, product: i64, images: VariantImages) -> Variant {
        Variant {
            id: VariantId::new(id),
            product_id: ProductId::new(product),
            name: format!("Variant {id}"),
            images,
        }
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.into_i64()).collect()
    }

    #[test]
    fn product_without_variants_is_inactive() {
        let products = [product(10, 1)];
        let variants: Vec<Variant> = Vec::new();

        assert!(active_products(&products, &variants).is_empty());
    }

    #[test]
    fn variant_without_images_does_not_activate_product() {
        let products = [product(10, 1)];
        let variants = [variant(100, 10, smallvec![])];

        assert!(active_products(&products, &variants).is_empty());
    }

    #[test]
    fn variant_with_one_image_activates_product() {
        let products = [product(10, 1), product(11, 1)];
        let variants = [variant(100, 10, smallvec!["/img/a.png".to_string()])];

        assert_eq!(ids(&active_products(&products, &variants)), vec![10]);
    }

    #[test]
    fn active_products_is_order_independent_and_idempotent() {
        let products = vec![product(3, 1), product(1, 2), product(2, 1)];
        let variants = vec![
            variant(30, 3, smallvec!["/a.png".to_string()]),
            variant(10, 1, smallvec!["/b.png".to_string()]),
            variant(20, 2, smallvec![]),
        ];

        let forward = ids(&active_products(&products, &variants));

        let reversed_products: Vec<Product> = products.iter().rev().cloned().collect();
        let reversed_variants: Vec<Variant> = variants.iter().rev().cloned().collect();
        let backward = ids(&active_products(&reversed_products, &reversed_variants));

        let again = ids(&active_products(&products, &variants));

        assert_eq!(forward, vec![1, 3]);
        assert_eq!(forward, backward, "input order must not matter");
        assert_eq!(forward, again, "re-running must give the same result");
    }

    #[test]
    fn collection_without_active_products_is_not_browsable() {
        let collections = [collection(1, "Marble"), collection(2, "Granite")];
        let products = [product(10, 1), product(20, 2)];
        let variants = [variant(100, 20, smallvec!["/g.png".to_string()])];

        let active = active_products(&products, &variants);
        let browsable = browsable_collections(&collections, &active);

        let names: Vec<&str> = browsable.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Granite"]);
    }

    #[test]
    fn active_products_in_filters_by_collection() {
        let products = [product(10, 1), product(20, 2), product(11, 1)];
        let variants = [
            variant(100, 10, smallvec!["/a.png".to_string()]),
            variant(110, 11, smallvec!["/b.png".to_string()]),
            variant(200, 20, smallvec!["/c.png".to_string()]),
        ];

        let in_marble = active_products_in(CollectionId::new(1), &products, &variants);

        assert_eq!(ids(&in_marble), vec![10, 11]);
    }
}
