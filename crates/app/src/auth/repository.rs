//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::models::{ActiveAdminToken, Admin, AdminCredentials, AdminUuid, NewAdminToken};

const FIND_ADMIN_BY_USERNAME_SQL: &str = include_str!("sql/find_admin_by_username.sql");
const GET_ADMIN_SQL: &str = include_str!("sql/get_admin.sql");
const CREATE_ADMIN_SQL: &str = include_str!("sql/create_admin.sql");
const CREATE_ADMIN_TOKEN_SQL: &str = include_str!("sql/create_admin_token.sql");
const FIND_ACTIVE_ADMIN_TOKEN_SQL: &str = include_str!("sql/find_active_admin_token.sql");
const TOUCH_ADMIN_TOKEN_SQL: &str = include_str!("sql/touch_admin_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredentials>, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(FIND_ADMIN_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn get_admin(&self, admin: AdminUuid) -> Result<Option<Admin>, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(GET_ADMIN_SQL)
            .bind(admin.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map(|record| record.map(|record| record.admin))
    }

    pub(crate) async fn create_admin(
        &self,
        admin: AdminUuid,
        username: &str,
        password_hash: &str,
    ) -> Result<Admin, sqlx::Error> {
        query_as::<Postgres, AdminCredentials>(CREATE_ADMIN_SQL)
            .bind(admin.into_uuid())
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map(|record| record.admin)
    }

    pub(crate) async fn create_admin_token(&self, token: &NewAdminToken) -> Result<(), sqlx::Error> {
        query(CREATE_ADMIN_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.admin_uuid.into_uuid())
            .bind(&token.token_hash)
            .bind(SqlxTimestamp::from(token.expires_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_admin_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<ActiveAdminToken>, sqlx::Error> {
        query_as::<Postgres, ActiveAdminToken>(FIND_ACTIVE_ADMIN_TOKEN_SQL)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_admin_token(&self, token_uuid: Uuid) -> Result<(), sqlx::Error> {
        query(TOUCH_ADMIN_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for AdminCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            admin: Admin {
                uuid: row.try_get::<Uuid, _>("uuid")?.into(),
                username: row.try_get("username")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveAdminToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            admin_uuid: row.try_get::<Uuid, _>("admin_uuid")?.into(),
        })
    }
}
