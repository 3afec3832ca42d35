//! Admin variant (inventory) API module

mod handler;

use axum::{Router, routing::get, routing::patch};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/variants",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/admin/variants/{id}",
            patch(handler::adjust).delete(handler::delete),
        )
}
