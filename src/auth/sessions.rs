/**
 * JWT Tokens
 *
 * This module handles JWT token generation and validation. The subject of
 * every token is the account email; a token is valid for 10 days from
 * issuance. The signing key is process-wide configuration - rotating
 * `JWT_SECRET` invalidates every outstanding token.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime in seconds (10 days)
pub const TOKEN_LIFETIME_SECS: u64 = 10 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using insecure development secret");
        "dev-secret-change-in-production".to_string()
    })
}

/// Create a JWT token for an account email
///
/// # Arguments
/// * `email` - Account email, stored as the token subject
///
/// # Returns
/// Signed JWT string, valid for 10 days
pub fn create_token(email: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp() as u64;

    let claims = Claims {
        sub: email.to_string(),
        exp: now + TOKEN_LIFETIME_SECS,
        iat: now,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Arguments
/// * `token` - JWT token string
///
/// # Returns
/// Decoded claims, or an error if the signature or expiry check fails
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
