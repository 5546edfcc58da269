//! Category endpoints
//!
//! `GET /categories` lists the categories; `GET /categories/{id}` is the
//! browse view and returns the unsold products filed under that category.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::categories::db::{self, Category};
use crate::error::ApiError;
use crate::products::db as products_db;
use crate::products::Product;
use crate::server::state::AppState;

/// `GET /categories`
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(db::find_all(&state.db).await?))
}

/// `GET /categories/{id}`
pub async fn get_category_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(products_db::find_unsold_by_category(&state.db, &id).await?))
}
