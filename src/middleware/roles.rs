/**
 * Role Gates
 *
 * Extractors that gate a handler on the stored role of the authenticated
 * account. They run after the access gate (which put [`AuthUser`] into the
 * request extensions), load the account by the decoded email, and compare
 * its role against the role the route requires.
 *
 * A token whose subject has the wrong role - or no account at all - gets a
 * 403. Returning 403 rather than 404 for a missing account keeps the gate
 * from disclosing whether an email is registered.
 */

use axum::http::request::Parts;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;
use crate::users::db::{self as users_db, Role};

/// Shared lookup for all role gates
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<AuthUser, ApiError> {
    let auth = parts
        .extensions
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthenticated("route is not behind the access gate"))?;

    let user = users_db::find_by_email(&state.db, &auth.email).await?;

    match user {
        Some(ref u) if u.role == Some(role) => Ok(auth),
        Some(_) => {
            tracing::warn!("{} lacks required role {:?}", auth.email, role);
            Err(ApiError::forbidden("account does not hold the required role"))
        }
        None => {
            // Valid token, but the account behind it is gone.
            tracing::warn!("token subject has no account: {}", auth.email);
            Err(ApiError::forbidden("unknown account"))
        }
    }
}

/// Gate: the authenticated account must have the `admin` role
#[derive(Clone, Debug)]
pub struct RequireAdmin(pub AuthUser);

/// Gate: the authenticated account must have the `seller` role
#[derive(Clone, Debug)]
pub struct RequireSeller(pub AuthUser);

/// Gate: the authenticated account must have the `buyer` role
#[derive(Clone, Debug)]
pub struct RequireBuyer(pub AuthUser);

impl axum::extract::FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Admin).await.map(Self)
    }
}

impl axum::extract::FromRequestParts<AppState> for RequireSeller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Seller).await.map(Self)
    }
}

impl axum::extract::FromRequestParts<AppState> for RequireBuyer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Buyer).await.map(Self)
    }
}
