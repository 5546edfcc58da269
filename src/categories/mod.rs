//! Product Categories
//!
//! Read-only over the API; the `categories` collection is seeded out of
//! band.

pub mod db;
pub mod handlers;

pub use db::Category;
