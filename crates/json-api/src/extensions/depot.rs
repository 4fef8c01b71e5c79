//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use quarry_app::auth::AdminUuid;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the admin authenticated for this request.
    fn insert_admin_uuid(&mut self, admin: AdminUuid);

    /// The authenticated admin, or 401 when the auth middleware did not run.
    fn admin_uuid_or_401(&self) -> Result<AdminUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_admin_uuid(&mut self, admin: AdminUuid) {
        self.inject(admin);
    }

    fn admin_uuid_or_401(&self) -> Result<AdminUuid, StatusError> {
        self.obtain::<AdminUuid>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
