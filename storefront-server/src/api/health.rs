//! Health check

use axum::{Json, Router, routing::get};

use crate::core::ServerState;
use crate::utils::AppResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health() -> Json<AppResponse> {
    Json(AppResponse::ok())
}
