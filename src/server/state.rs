/**
 * Application State
 *
 * The state shared across all request handlers. The MongoDB handle is the
 * only field: every handler that touches the store receives it explicitly
 * through Axum state extraction rather than through a process-wide global,
 * and `Database` is internally an `Arc` so cloning per request is cheap.
 */

use mongodb::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
