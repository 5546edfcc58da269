//! Server Module
//!
//! Startup wiring: environment configuration (`config`), the shared
//! application state (`state`), and router assembly (`init`).

/// Environment configuration and store connection
pub mod config;

/// Application state
pub mod state;

/// Application assembly
pub mod init;

pub use init::create_app;
pub use state::AppState;
