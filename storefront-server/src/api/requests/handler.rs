//! Admin order-request handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{OrderRequestWithItems, RequestStatus};
use crate::db::repository::order_request;
use crate::utils::{AppError, AppResponse, AppResult};

/// GET /api/admin/requests - all order requests, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderRequestWithItems>>> {
    let requests = order_request::find_all(&state.pool).await?;
    Ok(Json(requests))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

/// PATCH /api/admin/requests/:id - update the request status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> AppResult<Json<AppResponse>> {
    let Json(update) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    order_request::update_status(&state.pool, id, update.status).await?;

    Ok(Json(AppResponse::ok()))
}
