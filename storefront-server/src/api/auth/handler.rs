//! Admin auth handlers

use std::time::Duration;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::auth::session::verify_admin_password;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult};

/// Fixed delay for authentication to blunt timing probes
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    /// Session token for `Authorization: Bearer <token>`
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    if req.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let valid = verify_admin_password(
        &req.password,
        state.config.admin_password_hash.as_deref(),
        state.config.admin_password.as_deref(),
    );

    if !valid {
        tracing::warn!(target: "security", "Admin login failed");
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .session_service
        .generate_token()
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(target: "security", "Admin login succeeded");

    Ok(Json(LoginResponse {
        success: true,
        token,
        expires_in: state.session_service.expires_in_secs(),
    }))
}

/// POST /api/admin/logout
///
/// Sessions are stateless signed tokens - there is nothing to destroy
/// server-side; the client discards the token.
pub async fn logout() -> Json<AppResponse> {
    Json(AppResponse::ok())
}
