//! Payments
//!
//! Payment-intent creation against Stripe and the checkout finalization
//! sequence that records a completed payment and fans out the sold flags.

pub mod db;
pub mod handlers;
pub mod stripe;

pub use db::Payment;
