//! Server Implementation
//!
//! Router assembly and HTTP server lifecycle.

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::auth::require_admin;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// Assemble the full application router.
///
/// Admin resources sit behind the session middleware; the order intake,
/// health, and login routes are public.
pub fn build_router(state: ServerState) -> Router {
    let admin_routes = Router::new()
        .merge(api::requests::router())
        .merge(api::products::router())
        .merge(api::variants::router())
        .merge(api::sales::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::order::router())
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        let app = build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Storefront server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}
