//! Current Admin Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::auth::{Admin, AuthServiceError};

use crate::{extensions::*, state::State};

/// The authenticated admin
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminResponse {
    pub uuid: Uuid,
    pub username: String,
    pub created_at: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            uuid: admin.uuid.into_uuid(),
            username: admin.username,
            created_at: admin.created_at.to_string(),
        }
    }
}

/// Current Admin Handler
#[endpoint(
    tags("auth"),
    summary = "Current Admin",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Authenticated admin"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AdminResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_uuid_or_401()?;

    let admin = state.app.auth.get_admin(admin).await.map_err(|error| match error {
        // Token outlived its admin.
        AuthServiceError::NotFound => StatusError::unauthorized(),
        other => {
            tracing::error!(error = %other, "failed to load admin");

            StatusError::internal_server_error()
        }
    })?;

    Ok(Json(admin.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use quarry_app::auth::MockAuthService;

    use crate::test_helpers::{TEST_ADMIN_UUID, auth_app};

    use super::*;

    #[tokio::test]
    async fn test_me_returns_authenticated_admin() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_get_admin()
            .once()
            .withf(|admin| *admin == TEST_ADMIN_UUID)
            .return_once(|uuid| {
                Ok(Admin {
                    uuid,
                    username: "admin".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let response: AdminResponse = TestClient::get("http://example.com/auth/me")
            .send(&auth_app(auth).service(Router::with_path("auth/me").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, TEST_ADMIN_UUID.into_uuid());
        assert_eq!(response.username, "admin");

        Ok(())
    }
}
