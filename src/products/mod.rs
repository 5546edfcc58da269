//! Product Listings
//!
//! Seller-owned listings with advertise/report/sold flags. A listing
//! carries `verified: true` only when the seller account was verified at
//! the moment it was created.

pub mod db;
pub mod handlers;

pub use db::Product;
