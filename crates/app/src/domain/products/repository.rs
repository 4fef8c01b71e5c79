//! Products Repository

use quarry::{
    collections::CollectionId,
    products::{NewProduct, Product, ProductId},
};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::paging::{PageWindow, decode_total};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

struct ProductRow(Product);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(window.search.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        decode_total(count)
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let rows = query_as::<Postgres, ProductRow>(LIST_PRODUCTS_SQL)
            .bind(window.search.as_deref())
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|ProductRow(p)| p).collect())
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await
            .map(|ProductRow(p)| p)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(CREATE_PRODUCT_SQL)
            .bind(&product.name)
            .bind(product.collection_id.into_i64())
            .bind(&product.image_url)
            .fetch_one(&mut **tx)
            .await
            .map(|ProductRow(p)| p)
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        update: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRow>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(&update.name)
            .bind(update.collection_id.into_i64())
            .bind(&update.image_url)
            .fetch_one(&mut **tx)
            .await
            .map(|ProductRow(p)| p)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(Product {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            collection_id: CollectionId::new(row.try_get("collection_id")?),
            collection_name: row.try_get("collection_name")?,
            image_url: row.try_get("image_url")?,
        }))
    }
}
