/**
 * Payment Endpoints
 *
 * `POST /create-payment-intent` asks Stripe for a client-side payment
 * token. `POST /payments` is the checkout finalization sequence - the one
 * multi-document write path in the system:
 *
 * 1. Record the payment (find-or-insert keyed on the transaction id)
 * 2. Mark the product sold and store the transaction id
 * 3. Flip every order on that product to sold
 *
 * The payment lands first because its existence is the source of truth
 * for "did a sale happen". There is no multi-document transaction; steps
 * 2 and 3 are idempotent, so re-sending the same request after a partial
 * failure converges the documents.
 */

use axum::{extract::State, response::Json};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::error::ApiError;
use crate::orders::db as orders_db;
use crate::payments::db::{self, Payment};
use crate::payments::stripe;
use crate::products::db as products_db;
use crate::server::state::AppState;

/// Request body for `POST /create-payment-intent`
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub price: f64,
}

/// `POST /create-payment-intent`
pub async fn create_payment_intent(
    Json(request): Json<IntentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let client_secret = stripe::create_payment_intent(stripe::price_to_cents(request.price)).await?;
    Ok(Json(serde_json::json!({ "clientSecret": client_secret })))
}

/// `POST /payments`
pub async fn record_payment(
    State(state): State<AppState>,
    Json(payment): Json<Payment>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let product_oid = ObjectId::parse_str(&payment.product_id)
        .map_err(|_| ApiError::InvalidId(payment.product_id.clone()))?;

    // Step 1: the payment record, before any fan-out.
    let payment_result = db::find_or_insert(&state.db, &payment).await?;
    if payment_result.upserted_id.is_none() {
        tracing::info!(
            "payment {} already recorded, re-running fan-out",
            payment.transaction_id
        );
    }

    // Step 2: the product carries the sold flag and the transaction id.
    let product_result =
        products_db::mark_sold(&state.db, product_oid, &payment.transaction_id).await?;

    // Step 3: every order on the product.
    let orders_result =
        orders_db::mark_sold_by_product(&state.db, &payment.product_id).await?;

    tracing::info!(
        "payment {} finalized: product {} ({} matched), {} order(s) updated",
        payment.transaction_id,
        payment.product_id,
        product_result.matched_count,
        orders_result.modified_count,
    );

    Ok(Json(serde_json::json!({
        "paymentResult": {
            "acknowledged": true,
            "insertedId": payment_result.upserted_id,
        },
        "productResult": {
            "matchedCount": product_result.matched_count,
            "modifiedCount": product_result.modified_count,
        },
        "ordersResult": {
            "matchedCount": orders_result.matched_count,
            "modifiedCount": orders_result.modified_count,
        },
    })))
}
