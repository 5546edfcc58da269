/**
 * Order Endpoints
 *
 * `GET /orders` is scoped to the authenticated buyer - the email comes
 * from the token claims, never from a query parameter, so a buyer cannot
 * read another buyer's orders.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::middleware::roles::RequireBuyer;
use crate::orders::db::{self, Order};
use crate::server::state::AppState;

/// `GET /orders` (buyer)
pub async fn get_my_orders(
    buyer: RequireBuyer,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(db::find_by_buyer(&state.db, &buyer.0.email).await?))
}

/// `GET /orders/{id}`
///
/// Public single-order read used by the checkout page.
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Order>>, ApiError> {
    let id = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidId(id))?;
    Ok(Json(db::find_by_id(&state.db, id).await?))
}

/// `POST /orders` (buyer)
///
/// Find-or-insert keyed on (productID, buyerEmail). A second order against
/// the same product gets `{"found": true}` and nothing is written.
pub async fn create_order(
    _buyer: RequireBuyer,
    State(state): State<AppState>,
    Json(order): Json<Order>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = db::find_or_insert(&state.db, &order).await?;

    match result.upserted_id {
        Some(id) => {
            tracing::info!(
                "order placed on {} by {}",
                order.product_id,
                order.buyer_email
            );
            Ok(Json(serde_json::json!({
                "acknowledged": true,
                "insertedId": id,
            })))
        }
        None => Ok(Json(serde_json::json!({ "found": true }))),
    }
}
