//! Bearer token middleware guarding catalog mutations.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use quarry_app::auth::{AdminUuid, AuthServiceError};

use crate::{extensions::*, state::State};

/// Resolve the bearer token into an [`AdminUuid`](quarry_app::auth::AdminUuid)
/// in the depot, or stop the request.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(admin) => {
            depot.insert_admin_uuid(admin);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<AdminUuid, StatusError> {
    let token = bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|auth_error| match auth_error {
            AuthServiceError::NotFound | AuthServiceError::Token(_) => {
                StatusError::unauthorized().brief("Invalid or expired admin token")
            }
            other => {
                error!(error = %other, "failed to authenticate admin token");

                StatusError::internal_server_error()
            }
        })
}

/// Token part of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
