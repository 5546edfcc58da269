/**
 * Product Endpoints
 *
 * Sellers manage their own listings; any authenticated account can report a
 * listing, view the reported feed and delete (the client restricts delete
 * to the owner or a moderator, the API only requires a signed-in account,
 * matching observed behavior).
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::roles::RequireSeller;
use crate::products::db::{self, Product};
use crate::server::state::AppState;
use crate::users::db as users_db;

/// `GET /products/{email}` (seller)
///
/// The path value is the seller email whose listings are requested.
pub async fn get_seller_products(
    _seller: RequireSeller,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(db::find_by_seller(&state.db, &email).await?))
}

/// `POST /products` (seller)
///
/// Copies the seller's verified state onto the listing at creation time:
/// the flag is written only when the seller is verified right now, so later
/// verification does not retroactively badge old listings.
pub async fn create_product(
    _seller: RequireSeller,
    State(state): State<AppState>,
    Json(mut product): Json<Product>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let seller = users_db::find_by_email(&state.db, &product.seller_email).await?;

    product.id = None;
    product.sold = false;
    product.transaction_id = None;
    product.verified = match seller {
        Some(ref u) if u.verified => Some(true),
        _ => None,
    };

    let result = db::insert(&state.db, &product).await?;
    tracing::info!(
        "new listing '{}' by {} (verified: {})",
        product.name,
        product.seller_email,
        product.verified.unwrap_or(false)
    );

    Ok(Json(serde_json::json!({
        "acknowledged": true,
        "insertedId": result.inserted_id,
    })))
}

/// `GET /advertised`
pub async fn get_advertised(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(db::find_advertised(&state.db).await?))
}

/// `PATCH /products/advertised/{id}` (seller)
pub async fn advertise_product(
    _seller: RequireSeller,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
    let result = db::set_advertised(&state.db, id).await?;

    Ok(Json(serde_json::json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// `PATCH /products/report/{id}` (any signed-in account)
pub async fn report_product(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
    let result = db::set_reported(&state.db, id).await?;
    tracing::info!("listing {} reported by {}", id, user.email);

    Ok(Json(serde_json::json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// `GET /products/reported` (any signed-in account)
pub async fn get_reported(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(db::find_reported(&state.db).await?))
}

/// `DELETE /products/{id}` (any signed-in account)
pub async fn delete_product(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
    let result = db::delete(&state.db, id).await?;
    tracing::info!("listing {} deleted by {}", id, user.email);

    Ok(Json(serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })))
}
