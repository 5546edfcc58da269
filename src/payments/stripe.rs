/**
 * Stripe Payment Intents
 *
 * Thin client for the one provider call the marketplace makes:
 * `POST /v1/payment_intents`, form-encoded, authenticated with the secret
 * key as the basic-auth username per Stripe's API convention.
 */

use serde::Deserialize;

use crate::error::ApiError;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Create a payment intent and return its client secret
///
/// # Arguments
/// * `amount_cents` - Charge amount in the currency's smallest unit
pub async fn create_payment_intent(amount_cents: i64) -> Result<String, ApiError> {
    let secret_key = std::env::var("STRIPE_SECRET_KEY")
        .map_err(|_| ApiError::Config("STRIPE_SECRET_KEY not set".to_string()))?;

    let params = [
        ("amount", amount_cents.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let client = reqwest::Client::new();
    let response = client
        .post(PAYMENT_INTENTS_URL)
        .basic_auth(&secret_key, None::<&str>)
        .form(&params)
        .send()
        .await?
        .error_for_status()?;

    let intent: IntentResponse = response.json().await?;
    Ok(intent.client_secret)
}

/// Convert a listing price to the amount Stripe expects
pub fn price_to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_price_to_cents() {
        assert_eq!(price_to_cents(220.0), 22000);
        assert_eq!(price_to_cents(19.99), 1999);
        assert_eq!(price_to_cents(0.0), 0);
    }

    #[test]
    fn test_price_to_cents_rounds() {
        // 0.1 + 0.2 style float artifacts must not truncate a cent away
        assert_eq!(price_to_cents(10.555), 1056);
    }
}
