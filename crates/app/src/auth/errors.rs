//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::AdminTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token not found")]
    NotFound,

    #[error("admin already exists")]
    AlreadyExists,

    #[error("username and password are required")]
    MissingCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("token expiry is out of range")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] AdminTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}

impl From<AdminTokenError> for AuthServiceError {
    fn from(error: AdminTokenError) -> Self {
        Self::Token(error)
    }
}
