//! Sale Model
//!
//! A completed transaction recorded by staff. Created atomically with its
//! line items; creation decrements inventory in the same transaction.

use serde::{Deserialize, Serialize};

/// Where the sale happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum SaleChannel {
    Website,
    Instagram,
    Popup,
    Other,
}

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub channel: SaleChannel,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    /// Total in cents; NULL when no line item carried a price
    pub total: Option<i64>,
    pub created_at: i64,
}

/// Sale line item. `variant_id` is a plain reference: variants may be
/// hard-deleted afterwards and the row survives.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub id: i64,
    pub sale_id: i64,
    pub variant_id: i64,
    pub quantity: i64,
    pub unit_price: Option<i64>,
}

/// Sale with its line items (admin sales page)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithLineItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub line_items: Vec<SaleLineItem>,
}

/// Create sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    pub channel: SaleChannel,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub line_items: Vec<SaleLineItemCreate>,
}

/// Sale line item create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItemCreate {
    pub variant_id: i64,
    pub quantity: i64,
    /// Unit price in cents
    pub unit_price: Option<i64>,
}
