//! Variant Model
//!
//! One sellable size/color of a product, carrying the three independent
//! inventory ledger counters (on-hand, reserved, sold).

use serde::{Deserialize, Serialize};

/// Variant entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub size: String,
    pub color: Option<String>,
    pub sku: Option<String>,
    /// Selling price in cents
    pub price: Option<i64>,
    /// Acquisition cost in cents
    pub cost: Option<i64>,
    pub quantity_on_hand: i64,
    pub quantity_reserved: i64,
    pub quantity_sold: i64,
    pub last_restocked_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create variant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantCreate {
    pub product_id: i64,
    pub size: String,
    pub color: Option<String>,
    pub sku: Option<String>,
    pub price: Option<i64>,
    pub cost: Option<i64>,
    #[serde(default)]
    pub quantity_on_hand: i64,
}

/// Variant with product info (for the admin inventory table)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithProduct {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_slug: String,
    pub size: String,
    pub color: Option<String>,
    pub sku: Option<String>,
    pub price: Option<i64>,
    pub cost: Option<i64>,
    pub quantity_on_hand: i64,
    pub quantity_reserved: i64,
    pub quantity_sold: i64,
    pub last_restocked_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// The three ledger counters an adjustment may target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CounterField {
    QuantityOnHand,
    QuantityReserved,
    QuantitySold,
}

impl CounterField {
    /// Column name in the variant table
    pub fn column(&self) -> &'static str {
        match self {
            CounterField::QuantityOnHand => "quantity_on_hand",
            CounterField::QuantityReserved => "quantity_reserved",
            CounterField::QuantitySold => "quantity_sold",
        }
    }
}

/// Adjustment payload: signed delta applied to one counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantAdjust {
    pub field: CounterField,
    pub delta: i64,
}
