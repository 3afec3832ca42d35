//! Order intake domain
//!
//! Wire payload types for the public order endpoint and their conversion
//! into storage records. Two body shapes are accepted: the cart form
//! (an `items` array) and the legacy single-item form kept for older
//! clients. The shape is picked by an explicit discriminant - the
//! presence of `items` - rather than by probing individual fields.

pub mod validate;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{FulfillmentMethod, OrderRequestCreate, OrderRequestItemCreate};

pub use validate::{OrderRejection, validate_cart_order, validate_order_request};

/// Fulfillment choice as submitted by the order form (lowercase wire form;
/// stored uppercase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentChoice {
    Pickup,
    Delivery,
    Shipping,
}

impl From<FulfillmentChoice> for FulfillmentMethod {
    fn from(choice: FulfillmentChoice) -> Self {
        match choice {
            FulfillmentChoice::Pickup => FulfillmentMethod::Pickup,
            FulfillmentChoice::Delivery => FulfillmentMethod::Delivery,
            FulfillmentChoice::Shipping => FulfillmentMethod::Shipping,
        }
    }
}

/// One cart line as submitted by the order form. Prices arrive as
/// currency amounts and are converted to cents on persist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[validate(length(min = 1, message = "Product slug is required"))]
    pub product_slug: String,
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    #[validate(length(min = 1, message = "Size is required"))]
    pub size: String,
    #[validate(range(min = 1, max = 10, message = "Quantity must be between 1 and 10"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Cart-based order submission (multiple items)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartOrder {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Cart cannot be empty"))]
    pub items: Vec<CartItem>,
    pub fulfillment_method: FulfillmentChoice,
    pub shipping_address: Option<String>,
    #[validate(length(max = 1000, message = "Notes must be less than 1000 characters"))]
    pub notes: Option<String>,
    pub honeypot: Option<String>,
}

/// Legacy single-item order submission (backwards compatibility)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SingleOrder {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Please select a product"))]
    pub product_slug: String,
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    pub size: Option<String>,
    #[validate(range(min = 1, max = 10, message = "Quantity must be between 1 and 10"))]
    pub quantity: i64,
    pub fulfillment_method: FulfillmentChoice,
    pub shipping_address: Option<String>,
    #[validate(length(max = 1000, message = "Notes must be less than 1000 characters"))]
    pub notes: Option<String>,
    pub honeypot: Option<String>,
}

/// The two accepted order body shapes
#[derive(Debug, Clone)]
pub enum OrderPayload {
    Cart(CartOrder),
    Single(SingleOrder),
}

impl OrderPayload {
    /// Deserialize a request body, picking the shape by the presence of
    /// an `items` array.
    pub fn from_value(value: serde_json::Value) -> Result<Self, String> {
        let is_cart = value.get("items").is_some_and(|items| items.is_array());
        if is_cart {
            serde_json::from_value::<CartOrder>(value)
                .map(OrderPayload::Cart)
                .map_err(|e| e.to_string())
        } else {
            serde_json::from_value::<SingleOrder>(value)
                .map(OrderPayload::Single)
                .map_err(|e| e.to_string())
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Convert a currency amount to integer cents
fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

impl CartOrder {
    /// Build the storage record (call after validation)
    pub fn into_create(self) -> OrderRequestCreate {
        OrderRequestCreate {
            customer_name: self.name,
            email: self.email,
            phone: non_blank(self.phone),
            fulfillment_method: self.fulfillment_method.into(),
            shipping_address: non_blank(self.shipping_address),
            notes: non_blank(self.notes),
            items: self
                .items
                .into_iter()
                .map(|item| OrderRequestItemCreate {
                    product_slug: item.product_slug,
                    product_name: item.product_name,
                    variant_size: item.size,
                    quantity: item.quantity,
                    price: Some(to_cents(item.price)),
                })
                .collect(),
        }
    }
}

impl SingleOrder {
    /// Build the storage record (call after validation). Legacy items
    /// carry no price and default the size to "Unknown".
    pub fn into_create(self) -> OrderRequestCreate {
        OrderRequestCreate {
            customer_name: self.name,
            email: self.email,
            phone: non_blank(self.phone),
            fulfillment_method: self.fulfillment_method.into(),
            shipping_address: non_blank(self.shipping_address),
            notes: non_blank(self.notes),
            items: vec![OrderRequestItemCreate {
                product_slug: self.product_slug,
                product_name: self.product_name,
                variant_size: non_blank(self.size).unwrap_or_else(|| "Unknown".to_string()),
                quantity: self.quantity,
                price: None,
            }],
        }
    }
}
