//! Admin product handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate};
use crate::db::repository::product;
use crate::utils::validation::{
    MAX_ENTITY_NAME_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/admin/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = product::find_all(&state.pool).await?;
    Ok(Json(products))
}

/// POST /api/admin/products
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ProductCreate>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Json(data) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    validate_required_text(&data.name, "Name", MAX_ENTITY_NAME_LEN)?;
    validate_required_text(&data.slug, "Slug", MAX_ENTITY_NAME_LEN)?;

    let created = product::create(&state.pool, data).await?;
    Ok(Json(created))
}
