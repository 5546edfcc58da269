//! Buyer Orders
//!
//! One open order per (product, buyer) pair, flipped to `sold` when the
//! payment for the product lands.

pub mod db;
pub mod handlers;

pub use db::Order;
