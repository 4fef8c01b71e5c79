//! Collections Repository

use quarry::collections::{Collection, CollectionId};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::paging::{PageWindow, decode_total};

const LIST_COLLECTIONS_SQL: &str = include_str!("sql/list_collections.sql");
const COUNT_COLLECTIONS_SQL: &str = include_str!("sql/count_collections.sql");
const GET_COLLECTION_SQL: &str = include_str!("sql/get_collection.sql");
const CREATE_COLLECTION_SQL: &str = include_str!("sql/create_collection.sql");
const UPDATE_COLLECTION_SQL: &str = include_str!("sql/update_collection.sql");
const DELETE_COLLECTION_SQL: &str = include_str!("sql/delete_collection.sql");

struct CollectionRow(Collection);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCollectionsRepository;

impl PgCollectionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_collections(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_COLLECTIONS_SQL)
            .bind(window.search.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        decode_total(count)
    }

    pub(crate) async fn list_collections(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let rows = query_as::<Postgres, CollectionRow>(LIST_COLLECTIONS_SQL)
            .bind(window.search.as_deref())
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|CollectionRow(c)| c).collect())
    }

    pub(crate) async fn get_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionId,
    ) -> Result<Collection, sqlx::Error> {
        query_as::<Postgres, CollectionRow>(GET_COLLECTION_SQL)
            .bind(collection.into_i64())
            .fetch_one(&mut **tx)
            .await
            .map(|CollectionRow(c)| c)
    }

    pub(crate) async fn create_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Collection, sqlx::Error> {
        query_as::<Postgres, CollectionRow>(CREATE_COLLECTION_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
            .map(|CollectionRow(c)| c)
    }

    pub(crate) async fn update_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionId,
        name: &str,
    ) -> Result<Collection, sqlx::Error> {
        query_as::<Postgres, CollectionRow>(UPDATE_COLLECTION_SQL)
            .bind(collection.into_i64())
            .bind(name)
            .fetch_one(&mut **tx)
            .await
            .map(|CollectionRow(c)| c)
    }

    pub(crate) async fn delete_collection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        collection: CollectionId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COLLECTION_SQL)
            .bind(collection.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CollectionRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(Collection {
            id: CollectionId::new(row.try_get("id")?),
            name: row.try_get("name")?,
        }))
    }
}
