/**
 * Access Gate
 *
 * Middleware protecting routes that require a signed-in account. It
 * extracts the bearer token from the Authorization header, verifies the
 * signature and expiry, and attaches the decoded identity to the request
 * extensions for downstream handlers and role gates.
 *
 * Status codes follow the gate contract:
 * - 401 when no token is presented at all
 * - 403 when a token is presented but fails verification
 */

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::auth::sessions::verify_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated identity decoded from the JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

/// Access-gate middleware
///
/// This middleware:
/// 1. Extracts the JWT from the `Authorization: Bearer <token>` header
/// 2. Verifies signature and expiry
/// 3. Attaches [`AuthUser`] to request extensions
///
/// Returns 401 if the token is absent, 403 if it fails verification.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthenticated("missing Authorization header"))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| ApiError::unauthenticated("missing bearer token"))?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("token verification failed: {:?}", e);
        ApiError::forbidden("invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser { email: claims.sub });

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthUser missing from request extensions");
                ApiError::unauthenticated("route is not behind the access gate")
            })
    }
}
