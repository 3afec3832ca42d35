//! Authentication middleware
//!
//! Guards the admin API: every request must carry a valid
//! `Authorization: Bearer <token>` session token.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::session::AdminSession;
use crate::auth::SessionService;
use crate::core::ServerState;
use crate::utils::AppError;

/// Require an authenticated admin session.
///
/// On success the [`AdminSession`] is injected into request extensions.
/// Missing, malformed, expired, and invalid tokens all surface as 401 -
/// the admin surface does not distinguish why a session was refused.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(SessionService::extract_from_header) {
        Some(token) => token,
        None => {
            tracing::warn!(
                target: "security",
                uri = %req.uri(),
                "Admin request without session token"
            );
            return Err(AppError::Unauthorized);
        }
    };

    match state.session_service.validate_token(token) {
        Ok(claims) => {
            req.extensions_mut().insert(AdminSession::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(
                target: "security",
                error = %e,
                uri = %req.uri(),
                "Admin session validation failed"
            );
            Err(AppError::Unauthorized)
        }
    }
}
