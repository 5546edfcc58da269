/**
 * Application Assembly
 *
 * Builds the Axum application from a connected database handle. Split out
 * of `main` so tests can assemble the exact production router around a
 * lazily-connecting client.
 */

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::routes::router::create_router;
use crate::server::state::AppState;

/// Create the Axum application
///
/// # Arguments
/// * `db` - Connected database handle (see `server::config::connect_database`)
///
/// # Returns
/// Router with all routes, the access-gate middleware on the protected
/// subset, request tracing and permissive CORS (the storefront is served
/// from a different origin).
pub fn create_app(db: mongodb::Database) -> Router {
    let state = AppState::new(db);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
