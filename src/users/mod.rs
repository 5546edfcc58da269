//! User Accounts
//!
//! Account documents keyed by email, with an optional role
//! (admin / seller / buyer) and a verified flag set by admin action.

/// User document and collection operations
pub mod db;

/// User endpoints
pub mod handlers;

pub use db::{Role, User};
