//! Unified error handling
//!
//! [`AppError`] is the error type returned by every API handler. Its
//! `IntoResponse` impl produces the wire shapes the storefront clients
//! expect: `{"error": "..."}` with the matching status code, plus
//! `retryAfter` and a `Retry-After` header for rate-limited requests.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (4xx) ==========
    #[error("Unauthorized")]
    /// Missing or invalid admin session (401)
    Unauthorized,

    #[error("Invalid password")]
    /// Failed admin login (401)
    InvalidCredentials,

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Resource does not exist (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// Schema or business-rule violation (400)
    Validation(String),

    #[error("Resource already exists: {0}")]
    /// Uniqueness conflict (409)
    Conflict(String),

    #[error("Too many requests")]
    /// Fixed-window limit exceeded (429)
    RateLimited {
        /// Seconds until the window resets
        retry_after_secs: i64,
    },

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Storage failure (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Unexpected failure (500)
    Internal(String),
}

/// Error response body: `{"error": "...", "retryAfter": n?}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<i64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, retry_after) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid password".to_string(), None)
            }

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),

            AppError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.".to_string(),
                Some(*retry_after_secs),
            ),

            // Storage and internal errors: log details, expose a generic message
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again.".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again.".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorBody {
            error: message,
            retry_after,
        });

        let mut response = (status, body).into_response();
        if let AppError::RateLimited { retry_after_secs } = self
            && let Ok(value) = retry_after_secs.to_string().parse()
        {
            response
                .headers_mut()
                .insert(http::header::RETRY_AFTER, value);
        }
        response
    }
}

// ========== Helper Constructors ==========

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error; `resource` reads like "Variant 42"
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
