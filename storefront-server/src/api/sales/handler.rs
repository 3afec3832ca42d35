//! Admin sale handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::core::ServerState;
use crate::db::models::{SaleCreate, SaleWithLineItems};
use crate::db::repository::sale;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResponse, AppResult};

/// GET /api/admin/sales - all sales, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SaleWithLineItems>>> {
    let sales = sale::find_all(&state.pool).await?;
    Ok(Json(sales))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/admin/sales - record a sale and decrement inventory, atomically
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<SaleCreate>, JsonRejection>,
) -> AppResult<Json<AppResponse>> {
    let Json(mut data) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    if data.line_items.is_empty() {
        return Err(AppError::validation("At least one item is required"));
    }
    if data.line_items.iter().any(|item| item.quantity < 1) {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    validate_optional_text(&data.notes, "Notes", MAX_NOTE_LEN)?;

    // Empty strings from the sale form collapse to NULL
    data.customer_name = non_blank(data.customer_name);
    data.email = non_blank(data.email);
    data.notes = non_blank(data.notes);

    // Storage failure here is surfaced, never swallowed: losing a sale's
    // inventory effect silently would corrupt the ledger.
    sale::record(&state.pool, data).await?;

    Ok(Json(AppResponse::ok()))
}
