//! Middleware Module
//!
//! Request gates that run before resource handlers:
//!
//! - **`auth`** - the access gate: bearer-token extraction and verification
//! - **`roles`** - per-role gates that compare the stored role of the
//!   authenticated account against the role a route requires

/// Access gate (bearer token verification)
pub mod auth;

/// Role gates (admin / seller / buyer)
pub mod roles;

pub use auth::{require_auth, AuthUser};
pub use roles::{RequireAdmin, RequireBuyer, RequireSeller};
