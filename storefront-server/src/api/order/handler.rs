//! Order intake handler
//!
//! The public submission path: rate limit -> shape discrimination ->
//! validation -> best-effort persistence -> notification. The customer
//! acknowledgment never depends on the persistence or notification steps
//! succeeding.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use http::HeaderMap;

use crate::core::ServerState;
use crate::db::models::OrderRequestCreate;
use crate::db::repository::order_request;
use crate::orders::{
    OrderPayload, OrderRejection, validate_cart_order, validate_order_request,
};
use crate::services::client_identifier;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResponse, AppResult};

/// POST /api/order
pub async fn submit(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<AppResponse>> {
    let identifier = client_identifier(&headers);
    let decision = state
        .rate_limiter
        .check(&identifier, &state.config.order_rate_limit);

    if !decision.allowed {
        return Err(AppError::RateLimited {
            retry_after_secs: decision.retry_after_secs(now_millis()),
        });
    }

    let Json(body) = body.map_err(|e| AppError::validation(e.body_text()))?;
    let payload = OrderPayload::from_value(body).map_err(AppError::validation)?;

    // Validate per shape; spam is absorbed with an artificial success so
    // automated submitters cannot learn they were detected.
    let create = match payload {
        OrderPayload::Cart(order) => match validate_cart_order(&order) {
            Ok(()) => order.into_create(),
            Err(rejection) => return rejected(rejection),
        },
        OrderPayload::Single(order) => match validate_order_request(&order) {
            Ok(()) => order.into_create(),
            Err(rejection) => return rejected(rejection),
        },
    };

    accept_order(&state, create).await
}

fn rejected(rejection: OrderRejection) -> AppResult<Json<AppResponse>> {
    match rejection {
        OrderRejection::Spam => {
            tracing::debug!("Honeypot tripped - absorbing submission");
            Ok(Json(AppResponse::ok()))
        }
        other => Err(AppError::validation(other.message())),
    }
}

async fn accept_order(
    state: &ServerState,
    create: OrderRequestCreate,
) -> AppResult<Json<AppResponse>> {
    // Best-effort persistence: the customer-facing acknowledgment wins
    // over guaranteeing the admin-visible record. Lost writes surface in
    // the error log for operators to backfill.
    if let Err(e) = order_request::create(&state.pool, create.clone()).await {
        tracing::error!(
            error = %e,
            email = %create.email,
            "Failed to save order request - acknowledging anyway"
        );
    }

    let outcome = state.notifier.send_order_notifications(&create).await;
    if !outcome.delivered {
        tracing::error!(email = %create.email, "Order notification delivery failed");
    }

    let item_count: i64 = create.items.iter().map(|item| item.quantity).sum();
    tracing::info!(
        items = item_count,
        email = %create.email,
        channel = ?outcome.channel,
        "Order request processed"
    );

    Ok(Json(AppResponse::with_message(
        "Order request submitted successfully",
    )))
}
