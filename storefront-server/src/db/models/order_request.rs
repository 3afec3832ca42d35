//! Order Request Model
//!
//! A customer's expressed intent to buy - not a binding transaction.
//! Line items are denormalized catalog snapshots taken at submission time.

use serde::{Deserialize, Serialize};

/// How the customer wants to receive the order (stored form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum FulfillmentMethod {
    Pickup,
    Delivery,
    Shipping,
}

/// Admin-managed request lifecycle. NEW -> CONFIRMED -> CLOSED is the
/// expected flow in the UI but is not enforced server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    New,
    Confirmed,
    Closed,
}

/// Order request entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub id: i64,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub fulfillment_method: FulfillmentMethod,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub status: RequestStatus,
    pub created_at: i64,
}

/// Order request line item (denormalized snapshot)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestItem {
    pub id: i64,
    pub order_request_id: i64,
    pub product_slug: String,
    pub product_name: String,
    pub variant_size: String,
    pub quantity: i64,
    /// Unit price in cents; NULL for legacy single-item submissions
    pub price: Option<i64>,
}

/// Order request with its line items (admin list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestWithItems {
    #[serde(flatten)]
    pub request: OrderRequest,
    pub items: Vec<OrderRequestItem>,
}

/// Create payload (produced by the order validator, not deserialized
/// directly from the wire)
#[derive(Debug, Clone)]
pub struct OrderRequestCreate {
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub fulfillment_method: FulfillmentMethod,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderRequestItemCreate>,
}

/// Line item create payload
#[derive(Debug, Clone)]
pub struct OrderRequestItemCreate {
    pub product_slug: String,
    pub product_name: String,
    pub variant_size: String,
    pub quantity: i64,
    pub price: Option<i64>,
}
