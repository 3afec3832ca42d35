//! Admin order-request API module

mod handler;

use axum::{Router, routing::get, routing::patch};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/requests", get(handler::list))
        .route("/api/admin/requests/{id}", patch(handler::update_status))
}
