//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{
    Admin, AdminToken, AdminUuid, AuthServiceError, IssuedToken, NewAdmin, admin_token_hash,
    check_admin_token,
    models::NewAdminToken,
    password::{hash_password, verify_password},
    repository::PgAuthRepository,
};

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(12);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    token_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, token_ttl: SignedDuration) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            token_ttl,
        }
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::MissingCredentials`] for a blank username or
    /// empty password, [`AuthServiceError::AlreadyExists`] for a taken
    /// username, or a storage error.
    pub async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, AuthServiceError> {
        let username = admin.username.trim();

        if username.is_empty() || admin.password.is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        let hash = hash_password(&admin.password).map_err(AuthServiceError::PasswordHash)?;

        self.repository
            .create_admin(AdminUuid::now_v7(), username, &hash)
            .await
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError> {
        let Some(credentials) = self
            .repository
            .find_admin_by_username(username.trim())
            .await?
        else {
            debug!("login for unknown admin");

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password_hash, password) {
            warn!(admin = %credentials.admin.uuid, "rejected admin password");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let admin = credentials.admin;
        let token = AdminToken::generate();

        let expires_at = Timestamp::now()
            .checked_add(self.token_ttl)
            .map_err(AuthServiceError::Expiry)?;

        self.repository
            .create_admin_token(&NewAdminToken {
                uuid: Uuid::now_v7(),
                admin_uuid: admin.uuid,
                token_hash: admin_token_hash(token.as_str()),
                expires_at,
            })
            .await?;

        Ok(IssuedToken {
            token: token.reveal(),
            admin,
            expires_at,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<AdminUuid, AuthServiceError> {
        check_admin_token(bearer_token)?;

        let token = self
            .repository
            .find_active_admin_token(&admin_token_hash(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Auth success does not depend on this write.
        let _touch_result = self.repository.touch_admin_token(token.uuid).await;

        Ok(token.admin_uuid)
    }

    async fn get_admin(&self, admin: AdminUuid) -> Result<Admin, AuthServiceError> {
        self.repository
            .get_admin(admin)
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check an admin's password and issue a fresh bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a bearer token to the admin that owns it.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<AdminUuid, AuthServiceError>;

    /// Retrieve an admin account.
    async fn get_admin(&self, admin: AdminUuid) -> Result<Admin, AuthServiceError>;
}
