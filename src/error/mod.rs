//! API Error Module
//!
//! Error types shared by all HTTP handlers, split into:
//!
//! - **`types`** - The [`ApiError`] enum and its status-code mapping
//! - **`conversion`** - `IntoResponse` so handlers can return errors directly
//!
//! # Taxonomy
//!
//! - `Unauthenticated` - no bearer token presented (401)
//! - `Forbidden` - bad token, expired token, wrong or missing role (403)
//! - `NotFound` - a path referenced a document that does not exist (404)
//! - `InvalidId` - a path id is not a valid ObjectId (400)
//! - `Database` - MongoDB failure (500)
//! - `PaymentProvider` - Stripe call failure (502)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
