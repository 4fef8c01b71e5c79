//! Auth data models.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use uuid::Uuid;

/// Primary key of an [`Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdminUuid(Uuid);

impl AdminUuid {
    /// Time-ordered id for a new account.
    #[must_use]
    pub fn now_v7() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for AdminUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for AdminUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// An administrator allowed to mutate the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub uuid: AdminUuid,
    pub username: String,
    pub created_at: Timestamp,
}

/// New admin account request, holding the plain password until it is hashed.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub password: String,
}

/// Stored admin row including the Argon2 PHC string.
#[derive(Debug, Clone)]
pub(crate) struct AdminCredentials {
    pub admin: Admin,
    pub password_hash: String,
}

/// Unexpired token matched by its hash.
#[derive(Debug, Clone)]
pub(crate) struct ActiveAdminToken {
    pub uuid: Uuid,
    pub admin_uuid: AdminUuid,
}

/// Token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewAdminToken {
    pub uuid: Uuid,
    pub admin_uuid: AdminUuid,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Login result carrying the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub admin: Admin,
    pub expires_at: Timestamp,
}
