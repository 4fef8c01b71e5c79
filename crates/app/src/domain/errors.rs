//! Catalog service errors.

use quarry::validation::ValidationError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("resource already exists")]
    AlreadyExists,

    #[error("resource not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("resource is still referenced by other resources")]
    HasDependents,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CatalogServiceError {
    /// Map an error raised while deleting a row.
    ///
    /// A foreign key violation on delete means other rows still point at the
    /// one being removed.
    pub(crate) fn on_delete(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::HasDependents,
            _ => Self::from(error),
        }
    }
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = CatalogServiceError::from(Error::RowNotFound);

        assert!(matches!(error, CatalogServiceError::NotFound));
    }

    #[test]
    fn row_not_found_on_delete_is_still_not_found() {
        let error = CatalogServiceError::on_delete(Error::RowNotFound);

        assert!(matches!(error, CatalogServiceError::NotFound));
    }

    #[test]
    fn pool_errors_are_storage_errors() {
        let error = CatalogServiceError::from(Error::PoolTimedOut);

        assert!(matches!(error, CatalogServiceError::Sql(_)));
    }

    #[test]
    fn validation_errors_convert() {
        let error = CatalogServiceError::from(ValidationError::EmptyName);

        assert_eq!(error.to_string(), ValidationError::EmptyName.to_string());
    }
}
