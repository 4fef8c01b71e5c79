//! Gallery Repository

use quarry::gallery::{GalleryImage, GalleryImageId, NewGalleryImage};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::paging::{PageWindow, decode_total};

const LIST_GALLERY_IMAGES_SQL: &str = include_str!("sql/list_gallery_images.sql");
const COUNT_GALLERY_IMAGES_SQL: &str = include_str!("sql/count_gallery_images.sql");
const GET_GALLERY_IMAGE_SQL: &str = include_str!("sql/get_gallery_image.sql");
const CREATE_GALLERY_IMAGE_SQL: &str = include_str!("sql/create_gallery_image.sql");
const UPDATE_GALLERY_IMAGE_SQL: &str = include_str!("sql/update_gallery_image.sql");
const DELETE_GALLERY_IMAGE_SQL: &str = include_str!("sql/delete_gallery_image.sql");

struct GalleryImageRow(GalleryImage);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGalleryRepository;

impl PgGalleryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_gallery_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
        category: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_GALLERY_IMAGES_SQL)
            .bind(window.search.as_deref())
            .bind(category)
            .fetch_one(&mut **tx)
            .await?;

        decode_total(count)
    }

    pub(crate) async fn list_gallery_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: &PageWindow,
        category: Option<&str>,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let rows = query_as::<Postgres, GalleryImageRow>(LIST_GALLERY_IMAGES_SQL)
            .bind(window.search.as_deref())
            .bind(window.limit)
            .bind(window.offset)
            .bind(category)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|GalleryImageRow(g)| g).collect())
    }

    pub(crate) async fn get_gallery_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: GalleryImageId,
    ) -> Result<GalleryImage, sqlx::Error> {
        query_as::<Postgres, GalleryImageRow>(GET_GALLERY_IMAGE_SQL)
            .bind(image.into_i64())
            .fetch_one(&mut **tx)
            .await
            .map(|GalleryImageRow(g)| g)
    }

    pub(crate) async fn create_gallery_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: &NewGalleryImage,
    ) -> Result<GalleryImage, sqlx::Error> {
        query_as::<Postgres, GalleryImageRow>(CREATE_GALLERY_IMAGE_SQL)
            .bind(&image.image_url)
            .bind(image.title.as_deref())
            .bind(image.description.as_deref())
            .bind(image.category.as_deref())
            .fetch_one(&mut **tx)
            .await
            .map(|GalleryImageRow(g)| g)
    }

    pub(crate) async fn update_gallery_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: GalleryImageId,
        update: &NewGalleryImage,
    ) -> Result<GalleryImage, sqlx::Error> {
        query_as::<Postgres, GalleryImageRow>(UPDATE_GALLERY_IMAGE_SQL)
            .bind(image.into_i64())
            .bind(&update.image_url)
            .bind(update.title.as_deref())
            .bind(update.description.as_deref())
            .bind(update.category.as_deref())
            .fetch_one(&mut **tx)
            .await
            .map(|GalleryImageRow(g)| g)
    }

    pub(crate) async fn delete_gallery_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: GalleryImageId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_GALLERY_IMAGE_SQL)
            .bind(image.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for GalleryImageRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(GalleryImage {
            id: GalleryImageId::new(row.try_get("id")?),
            image_url: row.try_get("image_url")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
        }))
    }
}
