//! Admin Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use quarry_app::auth::{AuthServiceError, IssuedToken};

use crate::{extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued admin token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    /// Bearer token; only ever returned here
    pub token: String,

    /// RFC 3339 expiry instant
    pub expires_at: String,

    /// Authenticated admin UUID
    pub admin_uuid: Uuid,

    /// Authenticated admin username
    pub username: String,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at.to_string(),
            admin_uuid: issued.admin.uuid.into_uuid(),
            username: issued.admin.username,
        }
    }
}

/// Admin Login Handler
///
/// Exchanges admin credentials for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Admin Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.login",
    skip(json, depot),
    fields(username = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("username", request.username.as_str());

    let issued = state
        .app
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(|error| match error {
            AuthServiceError::InvalidCredentials
            | AuthServiceError::MissingCredentials
            | AuthServiceError::NotFound => {
                StatusError::unauthorized().brief("Invalid username or password")
            }
            other => {
                error!(error = %other, "failed to issue admin token");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(issued.into()))
}
