/**
 * User Endpoints
 *
 * - `GET /users` - list every account (public, matches observed behavior)
 * - `GET /users/allSeller`, `GET /users/allBuyer` - admin only
 * - `POST /users` - find-or-insert by email
 * - `DELETE /users/{id}`, `PATCH /users/verify/{id}` - admin only
 * - `GET /users/admin/{email}` etc. - public role probes used by clients
 *   to decide which dashboard to render
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::middleware::roles::RequireAdmin;
use crate::server::state::AppState;
use crate::users::db::{self, Role, User};

/// `GET /users`
pub async fn get_all_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(db::find_all(&state.db).await?))
}

/// `GET /users/allSeller` (admin)
pub async fn get_all_sellers(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(db::find_by_role(&state.db, Role::Seller).await?))
}

/// `GET /users/allBuyer` (admin)
pub async fn get_all_buyers(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(db::find_by_role(&state.db, Role::Buyer).await?))
}

/// `POST /users`
///
/// Find-or-insert keyed on the email. A repeated sign-in gets
/// `{"found": true, "email": ...}` and the store keeps a single account.
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let email = user.email.clone();
    let result = db::find_or_insert(&state.db, &user).await?;

    match result.upserted_id {
        Some(id) => {
            tracing::info!("created account for {}", email);
            Ok(Json(serde_json::json!({
                "acknowledged": true,
                "insertedId": id,
            })))
        }
        None => Ok(Json(serde_json::json!({ "found": true, "email": email }))),
    }
}

/// `DELETE /users/{id}` (admin)
pub async fn delete_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
    let result = db::delete(&state.db, id).await?;
    tracing::info!("deleted account {} ({} document)", id, result.deleted_count);

    Ok(Json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })))
}

/// `PATCH /users/verify/{id}` (admin)
pub async fn verify_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
    let result = db::set_verified(&state.db, id).await?;

    Ok(Json(serde_json::json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

async fn has_role(state: &AppState, email: &str, role: Role) -> Result<bool, ApiError> {
    let user = db::find_by_email(&state.db, email).await?;
    Ok(user.map(|u| u.role == Some(role)).unwrap_or(false))
}

/// `GET /users/admin/{email}`
pub async fn check_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let is_admin = has_role(&state, &email, Role::Admin).await?;
    Ok(Json(serde_json::json!({ "isAdmin": is_admin })))
}

/// `GET /users/seller/{email}`
pub async fn check_seller(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let is_seller = has_role(&state, &email, Role::Seller).await?;
    Ok(Json(serde_json::json!({ "isSeller": is_seller })))
}

/// `GET /users/buyer/{email}`
pub async fn check_buyer(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let is_buyer = has_role(&state, &email, Role::Buyer).await?;
    Ok(Json(serde_json::json!({ "isBuyer": is_buyer })))
}
