//! HTTP-level tests for the assembled router: order intake behavior
//! (spam absorption, validation, rate limiting) and the admin surface
//! (auth gate, inventory and sale flows).

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront_server::core::{Config, ServerState, build_router};
use storefront_server::db::DbService;
use storefront_server::services::RateLimitConfig;

async fn test_state() -> ServerState {
    let db = DbService::open_in_memory().await.expect("in-memory db");

    let mut config = Config::from_env();
    config.admin_password = Some("test-password".to_string());
    config.admin_password_hash = None;
    config.order_rate_limit = RateLimitConfig {
        max_requests: 100,
        window_ms: 60_000,
    };
    config.session.secret = "integration-test-secret-0123456789abcdef".to_string();

    ServerState::new(config, db.pool)
}

async fn test_app() -> (Router, ServerState) {
    let state = test_state().await;
    (build_router(state.clone()), state)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn cart_order() -> Value {
    json!({
        "name": "Jess Delacroix",
        "email": "jess@example.com",
        "items": [{
            "productSlug": "bangkok-gold",
            "productName": "Bangkok Gold",
            "size": "M",
            "quantity": 2,
            "price": 45.0
        }],
        "fulfillmentMethod": "pickup"
    })
}

async fn order_request_count(state: &ServerState) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM order_request")
        .fetch_one(&state.pool)
        .await
        .expect("count")
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/admin/login",
            &json!({"password": "test-password"}),
        ))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    body["token"].as_str().expect("token").to_string()
}

fn authed(request: Request<Body>, token: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts.headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().expect("header"),
    );
    Request::from_parts(parts, body)
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_order_submission_persists_and_acknowledges() {
    let (app, state) = test_app().await;

    let response = app.oneshot(post_json("/api/order", &cart_order())).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Order request submitted successfully"));

    assert_eq!(order_request_count(&state).await, 1);
}

#[tokio::test]
async fn test_legacy_single_item_order_accepted() {
    let (app, state) = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/order",
            &json!({
                "name": "Jess Delacroix",
                "email": "jess@example.com",
                "productSlug": "bangkok-gold",
                "productName": "Bangkok Gold",
                "quantity": 1,
                "fulfillmentMethod": "delivery"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(order_request_count(&state).await, 1);

    let price: Option<i64> = sqlx::query_scalar("SELECT price FROM order_request_item")
        .fetch_one(&state.pool)
        .await
        .expect("item row");
    assert_eq!(price, None);
}

#[tokio::test]
async fn test_spam_is_absorbed_silently() {
    let (app, state) = test_app().await;

    let mut order = cart_order();
    order["honeypot"] = json!("http://spam.example");

    let response = app.oneshot(post_json("/api/order", &order)).await.expect("response");
    // Indistinguishable from success on the wire
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));

    // But nothing was persisted
    assert_eq!(order_request_count(&state).await, 0);
}

#[tokio::test]
async fn test_shipping_without_address_rejected() {
    let (app, state) = test_app().await;

    let mut order = cart_order();
    order["fulfillmentMethod"] = json!("shipping");

    let response = app.oneshot(post_json("/api/order", &order)).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        json!("Shipping address is required for shipping orders")
    );
    assert_eq!(order_request_count(&state).await, 0);
}

#[tokio::test]
async fn test_schema_violation_rejected() {
    let (app, _state) = test_app().await;

    let mut order = cart_order();
    order["email"] = json!("not-an-email");

    let response = app.oneshot(post_json("/api/order", &order)).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().expect("error").contains("email"));
}

#[tokio::test]
async fn test_rate_limit_returns_429_with_retry_after() {
    let state = {
        let mut state = test_state().await;
        state.config.order_rate_limit = RateLimitConfig {
            max_requests: 2,
            window_ms: 60_000,
        };
        state
    };
    let app = build_router(state);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/order", &cart_order()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(post_json("/api/order", &cart_order()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    let body = response_json(response).await;
    assert!(body["retryAfter"].as_i64().expect("retryAfter") >= 1);
    assert!(body["error"].as_str().expect("error").contains("Too many requests"));
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let (app, _state) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/variants")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_json("/api/admin/sales", &json!({"channel": "POPUP", "lineItems": []})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(post_json("/api/admin/login", &json!({"password": "nope"})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_inventory_and_sale_flow() {
    let (app, _state) = test_app().await;
    let token = login(&app).await;

    // Create a product
    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/admin/products",
                &json!({"name": "Bangkok Gold", "slug": "bangkok-gold"}),
            ),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let product = response_json(response).await;
    let product_id = product["id"].as_i64().expect("product id");

    // Create a variant with initial stock
    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/admin/variants",
                &json!({
                    "productId": product_id,
                    "size": "M",
                    "price": 4500,
                    "quantityOnHand": 5
                }),
            ),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let variant = response_json(response).await;
    let variant_id = variant["id"].as_i64().expect("variant id");
    assert!(variant["lastRestockedAt"].as_i64().is_some());

    // Record a sale of 2
    let response = app
        .clone()
        .oneshot(authed(
            post_json(
                "/api/admin/sales",
                &json!({
                    "channel": "POPUP",
                    "lineItems": [{"variantId": variant_id, "quantity": 2, "unitPrice": 4500}]
                }),
            ),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Inventory reflects the sale
    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .uri("/api/admin/variants")
                .body(Body::empty())
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    let variants = response_json(response).await;
    let row = &variants.as_array().expect("array")[0];
    assert_eq!(row["quantityOnHand"], json!(3));
    assert_eq!(row["quantitySold"], json!(2));

    // Sale total was computed
    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .uri("/api/admin/sales")
                .body(Body::empty())
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    let sales = response_json(response).await;
    assert_eq!(sales.as_array().expect("array")[0]["total"], json!(9000));

    // Adjust: negative delta beyond stock clamps at zero
    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/admin/variants/{variant_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"field": "quantityOnHand", "delta": -100}).to_string(),
                ))
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown variant id is a 404
    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri("/api/admin/variants/999999")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"field": "quantityOnHand", "delta": 1}).to_string(),
                ))
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Hard delete
    let response = app
        .oneshot(authed(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/variants/{variant_id}"))
                .body(Body::empty())
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_status_update_flow() {
    let (app, state) = test_app().await;

    // Submit an order, then manage it as admin
    let response = app
        .clone()
        .oneshot(post_json("/api/order", &cart_order()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let request_id: i64 = sqlx::query_scalar("SELECT id FROM order_request")
        .fetch_one(&state.pool)
        .await
        .expect("request id");

    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/admin/requests/{request_id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"status": "CONFIRMED"}).to_string()))
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .uri("/api/admin/requests")
                .body(Body::empty())
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    let requests = response_json(response).await;
    let row = &requests.as_array().expect("array")[0];
    assert_eq!(row["status"], json!("CONFIRMED"));
    assert_eq!(row["items"].as_array().expect("items").len(), 1);

    // Unknown request id is a 404
    let response = app
        .oneshot(authed(
            Request::builder()
                .method("PATCH")
                .uri("/api/admin/requests/424242")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"status": "CLOSED"}).to_string()))
                .expect("request"),
            &token,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_product_slug_conflicts() {
    let (app, _state) = test_app().await;
    let token = login(&app).await;

    let body = json!({"name": "Bangkok Gold", "slug": "bangkok-gold"});
    let response = app
        .clone()
        .oneshot(authed(post_json("/api/admin/products", &body), &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed(post_json("/api/admin/products", &body), &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
