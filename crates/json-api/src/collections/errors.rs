//! Collection Errors

use salvo::http::StatusError;

use quarry_app::domain::CatalogServiceError;

use crate::errors::catalog_status_error;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    catalog_status_error(error, "Collection")
}
