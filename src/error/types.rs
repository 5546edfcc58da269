/**
 * API Error Types
 *
 * This module defines the error type returned by HTTP handlers. Every
 * handler failure is funneled through `ApiError` so status codes come from
 * one place instead of being scattered across handlers.
 *
 * # Status Code Mapping
 *
 * - `Unauthenticated` - 401 (no credential at all)
 * - `Forbidden` - 403 (credential present but rejected, or wrong role)
 * - `NotFound` - 404
 * - `InvalidId` - 400
 * - `Token` - 500 (signing failed while issuing, not while verifying;
 *   verification failures are mapped to `Forbidden` at the gate)
 * - `Database` - 500
 * - `Config` - 500
 * - `PaymentProvider` - 502
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can surface from any marketplace handler
///
/// Store and provider errors wrap their source so the `?` operator works
/// directly on `mongodb` and `reqwest` calls inside handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token was presented
    #[error("unauthorized access: {0}")]
    Unauthenticated(String),

    /// Token rejected, role mismatch, or unknown identity
    #[error("forbidden access: {0}")]
    Forbidden(String),

    /// A referenced document does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A path parameter is not a valid document id
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Signing a token failed while issuing one
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Document store failure
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Required configuration is missing
    #[error("configuration error: {0}")]
    Config(String),

    /// The payment provider call failed
    #[error("payment provider error: {0}")]
    PaymentProvider(#[from] reqwest::Error),
}

impl ApiError {
    /// Create an `Unauthenticated` error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    /// Create a `Forbidden` error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::Token(_) | Self::Database(_) | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::PaymentProvider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
