//! Admin variant handlers
//!
//! Inventory ledger mutations: variant CRUD and counter adjustments.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::core::ServerState;
use crate::db::models::{Variant, VariantAdjust, VariantCreate, VariantWithProduct};
use crate::db::repository::{product, variant};
use crate::utils::validation::{MAX_ENTITY_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult};

/// GET /api/admin/variants - inventory table (variant + product info)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<VariantWithProduct>>> {
    let variants = variant::find_all_with_products(&state.pool).await?;
    Ok(Json(variants))
}

/// POST /api/admin/variants
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<VariantCreate>, JsonRejection>,
) -> AppResult<Json<Variant>> {
    let Json(data) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    validate_required_text(&data.size, "Size", MAX_ENTITY_NAME_LEN)?;
    if data.quantity_on_hand < 0 {
        return Err(AppError::validation("Quantity on hand must not be negative"));
    }
    if product::find_by_id(&state.pool, data.product_id).await?.is_none() {
        return Err(AppError::not_found(format!("Product {}", data.product_id)));
    }

    let created = variant::create(&state.pool, data).await?;
    Ok(Json(created))
}

/// PATCH /api/admin/variants/:id - apply a signed delta to one counter
pub async fn adjust(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<VariantAdjust>, JsonRejection>,
) -> AppResult<Json<AppResponse>> {
    let Json(adjustment) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    variant::adjust(&state.pool, id, adjustment.field, adjustment.delta).await?;

    Ok(Json(AppResponse::ok()))
}

/// DELETE /api/admin/variants/:id - unconditional hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse>> {
    variant::delete(&state.pool, id).await?;
    Ok(Json(AppResponse::ok()))
}
