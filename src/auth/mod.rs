//! Authentication Module
//!
//! JWT token creation/verification (`sessions`) and the token-issuing
//! endpoint `GET /jwt` (`handlers`). Token validity is purely a function of
//! signature and expiry; there is no session store and no revocation list.

/// JWT claims, signing and verification
pub mod sessions;

/// Token-issuing endpoint
pub mod handlers;

pub use sessions::{create_token, verify_token, Claims};
