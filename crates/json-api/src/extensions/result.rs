//! Result helpers for handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;

/// Collapse an unexpected failure into a logged 500.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            tracing::error!(error = %error, "{context}");

            StatusError::internal_server_error()
        })
    }
}
