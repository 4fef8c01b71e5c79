//! Variants Repository

use quarry::{
    products::ProductId,
    variants::{NewVariant, Variant, VariantId},
};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    paging::{PageWindow, decode_total},
    variants::VariantListing,
};

const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const COUNT_VARIANTS_SQL: &str = include_str!("sql/count_variants.sql");
const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const LIST_PRODUCT_VARIANTS_SQL: &str = include_str!("sql/list_product_variants.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const UPDATE_VARIANT_SQL: &str = include_str!("sql/update_variant.sql");
const DELETE_VARIANT_SQL: &str = include_str!("sql/delete_variant.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVariantsRepository;

impl PgVariantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_VARIANTS_SQL)
            .bind(window.search.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        decode_total(count)
    }

    pub(crate) async fn list_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
    ) -> Result<Vec<VariantListing>, sqlx::Error> {
        query_as::<Postgres, VariantListing>(LIST_VARIANTS_SQL)
            .bind(window.search.as_deref())
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantId,
    ) -> Result<VariantListing, sqlx::Error> {
        query_as::<Postgres, VariantListing>(GET_VARIANT_SQL)
            .bind(variant.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<VariantListing>, sqlx::Error> {
        query_as::<Postgres, VariantListing>(LIST_PRODUCT_VARIANTS_SQL)
            .bind(product.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: &NewVariant,
    ) -> Result<VariantListing, sqlx::Error> {
        query_as::<Postgres, VariantListing>(CREATE_VARIANT_SQL)
            .bind(variant.product_id.into_i64())
            .bind(&variant.name)
            .bind(&variant.images)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantId,
        update: &NewVariant,
    ) -> Result<VariantListing, sqlx::Error> {
        query_as::<Postgres, VariantListing>(UPDATE_VARIANT_SQL)
            .bind(variant.into_i64())
            .bind(update.product_id.into_i64())
            .bind(&update.name)
            .bind(&update.images)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_VARIANT_SQL)
            .bind(variant.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for VariantListing {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let images: Vec<String> = row.try_get("images")?;

        Ok(Self {
            variant: Variant {
                id: VariantId::new(row.try_get("id")?),
                product_id: ProductId::new(row.try_get("product_id")?),
                name: row.try_get("name")?,
                images: images.into_iter().collect(),
            },
            product_name: row.try_get("product_name")?,
        })
    }
}
