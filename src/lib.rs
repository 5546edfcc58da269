//! Resale Market - Main Library
//!
//! Backend server for a second-hand marketplace: user accounts with roles
//! (admin/seller/buyer), product listings grouped by category, orders and
//! payment recording, backed by MongoDB and served over HTTP with Axum.
//!
//! # Module Structure
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route table and router assembly
//! - **`error`** - API error types and HTTP response conversion
//! - **`auth`** - JWT token issuing and verification
//! - **`middleware`** - Access gate and role gates
//! - **`users`**, **`categories`**, **`products`**, **`orders`**,
//!   **`payments`** - One module per resource, each split into document +
//!   collection operations (`db`) and Axum handlers (`handlers`)
//!
//! # State Management
//!
//! All persistent state lives in MongoDB. Handlers receive the database
//! handle through [`server::state::AppState`]; the process holds no
//! cross-request locks, queues, or caches. Every store call is awaited I/O.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`. The [`error::ApiError`] type maps
//! the failure taxonomy onto HTTP status codes (401 for a missing token,
//! 403 for a bad token or wrong role) and renders a JSON error body.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// API error types
pub mod error;

/// JWT tokens and the token-issuing endpoint
pub mod auth;

/// Access gate and role gates
pub mod middleware;

/// User accounts and roles
pub mod users;

/// Product categories
pub mod categories;

/// Product listings
pub mod products;

/// Buyer orders
pub mod orders;

/// Payment recording and payment intents
pub mod payments;

pub use error::ApiError;
pub use server::init::create_app;
pub use server::state::AppState;
