/**
 * Token Issuer Handler
 *
 * Implements `GET /jwt?email=`. A token is only issued for a known account:
 * the email is looked up first, and an unknown email gets a 403 with an
 * empty token so the client can distinguish "sign in first" from a server
 * fault.
 */

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::auth::sessions::create_token;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::users::db as users_db;

/// Query parameters for `GET /jwt`
#[derive(Debug, Deserialize)]
pub struct JwtQuery {
    pub email: String,
}

/// Issue a JWT for a known account email
///
/// # Returns
///
/// * `200` with `{"accessToken": <jwt>}` when the account exists
/// * `403` with `{"accessToken": ""}` when it does not
pub async fn issue_jwt(
    State(state): State<AppState>,
    Query(query): Query<JwtQuery>,
) -> Result<Response, ApiError> {
    let user = users_db::find_by_email(&state.db, &query.email).await?;

    if user.is_none() {
        tracing::warn!("token requested for unknown account: {}", query.email);
        return Ok((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "accessToken": "" })),
        )
            .into_response());
    }

    let token = create_token(&query.email)?;
    tracing::info!("issued token for {}", query.email);

    Ok(Json(serde_json::json!({ "accessToken": token })).into_response())
}
