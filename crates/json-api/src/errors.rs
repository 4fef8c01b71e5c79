//! Catalog service error mapping shared by the resource handlers.

use salvo::http::StatusError;
use tracing::error;

use quarry_app::domain::CatalogServiceError;

/// Translate a catalog service failure for the resource called `noun`.
pub(crate) fn catalog_status_error(error: CatalogServiceError, noun: &str) -> StatusError {
    match error {
        CatalogServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CatalogServiceError::InvalidReference => {
            StatusError::bad_request().brief(format!("{noun} references a missing record"))
        }
        CatalogServiceError::MissingRequiredData | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief(format!("Invalid {noun} payload"))
        }
        CatalogServiceError::NotFound => {
            StatusError::not_found().brief(format!("{noun} not found"))
        }
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief(format!("{noun} already exists"))
        }
        CatalogServiceError::HasDependents => {
            StatusError::conflict().brief(format!("{noun} is still in use"))
        }
        CatalogServiceError::Sql(source) => {
            error!(error = %source, "{noun} storage failure");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use quarry::validation::ValidationError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let status = catalog_status_error(ValidationError::EmptyName.into(), "Collection");

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "name must not be empty");
    }

    #[test]
    fn test_dependents_are_conflicts() {
        let status = catalog_status_error(CatalogServiceError::HasDependents, "Product");

        assert_eq!(status.code, StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_rows_are_not_found() {
        let status = catalog_status_error(CatalogServiceError::NotFound, "Variant");

        assert_eq!(status.code, StatusCode::NOT_FOUND);
        assert_eq!(status.brief, "Variant not found");
    }
}
