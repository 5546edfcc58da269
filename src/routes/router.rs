/**
 * Router Configuration
 *
 * The full HTTP surface, assembled from a public router and a gated
 * router. The gated router carries the access-gate middleware via
 * `route_layer`, so unmatched paths still 404 instead of 401; per-role
 * checks are extractor parameters on the individual handlers.
 *
 * # Routes
 *
 * ## Public
 * - `GET /` - liveness
 * - `GET /jwt?email=` - token issuer
 * - `GET /users`, `POST /users` - account list / find-or-insert
 * - `GET /users/admin/{email}` (same for seller, buyer) - role probes
 * - `GET /categories`, `GET /categories/{id}` - category list / browse
 * - `GET /advertised` - advertised, unsold products
 * - `GET /orders/{id}` - single order (checkout page)
 * - `POST /create-payment-intent`, `POST /payments`
 *
 * ## Gated (bearer token required)
 * - `GET /users/allSeller`, `GET /users/allBuyer` - admin
 * - `DELETE /users/{id}`, `PATCH /users/verify/{id}` - admin
 * - `GET /products/{email}`, `POST /products`,
 *   `PATCH /products/advertised/{id}` - seller
 * - `PATCH /products/report/{id}`, `GET /products/reported`,
 *   `DELETE /products/{id}` - any signed-in account
 * - `GET /orders`, `POST /orders` - buyer
 */

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::auth::handlers::issue_jwt;
use crate::categories::handlers::{get_categories, get_category_products};
use crate::middleware::auth::require_auth;
use crate::orders::handlers::{create_order, get_my_orders, get_order};
use crate::payments::handlers::{create_payment_intent, record_payment};
use crate::products::handlers::{
    advertise_product, create_product, delete_product, get_advertised, get_reported,
    get_seller_products, report_product,
};
use crate::server::state::AppState;
use crate::users::handlers::{
    check_admin, check_buyer, check_seller, create_user, delete_user, get_all_buyers,
    get_all_sellers, get_all_users, verify_user,
};

async fn root() -> &'static str {
    "The resale market server is running."
}

/// Create the router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/jwt", get(issue_jwt))
        .route("/users", get(get_all_users).post(create_user))
        .route("/users/admin/{email}", get(check_admin))
        .route("/users/seller/{email}", get(check_seller))
        .route("/users/buyer/{email}", get(check_buyer))
        .route("/categories", get(get_categories))
        .route("/categories/{id}", get(get_category_products))
        .route("/advertised", get(get_advertised))
        .route("/orders/{id}", get(get_order))
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(record_payment));

    let gated = Router::new()
        .route("/users/allSeller", get(get_all_sellers))
        .route("/users/allBuyer", get(get_all_buyers))
        .route("/users/{id}", delete(delete_user))
        .route("/users/verify/{id}", patch(verify_user))
        .route("/products", post(create_product))
        // One entry for both methods: the GET path value is a seller email,
        // the DELETE path value is a listing id.
        .route(
            "/products/{id}",
            get(get_seller_products).delete(delete_product),
        )
        .route("/products/advertised/{id}", patch(advertise_product))
        .route("/products/report/{id}", patch(report_product))
        .route("/products/reported", get(get_reported))
        .route("/orders", get(get_my_orders).post(create_order))
        .route_layer(middleware::from_fn(require_auth));

    public.merge(gated).with_state(state)
}
