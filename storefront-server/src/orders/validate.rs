//! Order payload validation
//!
//! Checks run short-circuiting, in order: schema, honeypot, fulfillment
//! business rules. Pure - no storage access.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::{CartOrder, FulfillmentChoice, SingleOrder};

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRejection {
    /// Field-level schema violation; message joins every failed rule
    Schema(String),
    /// Honeypot tripped. The HTTP layer must answer with an artificial
    /// success so automated submitters cannot learn they were detected.
    Spam,
    /// Fulfillment is shipping but no usable address was given
    ShippingAddressRequired,
}

impl OrderRejection {
    /// Message surfaced to the caller (not used for [`Spam`])
    ///
    /// [`Spam`]: OrderRejection::Spam
    pub fn message(&self) -> String {
        match self {
            OrderRejection::Schema(msg) => msg.clone(),
            OrderRejection::Spam => "spam_detected".to_string(),
            OrderRejection::ShippingAddressRequired => {
                "Shipping address is required for shipping orders".to_string()
            }
        }
    }
}

/// Validate a cart-based order (multiple items)
pub fn validate_cart_order(order: &CartOrder) -> Result<(), OrderRejection> {
    // Collect every schema violation, top-level and per-item, into one
    // joined message
    let mut messages = Vec::new();
    if let Err(errors) = order.validate() {
        collect_messages(&errors, &mut messages);
    }
    for item in &order.items {
        if let Err(errors) = item.validate() {
            collect_messages(&errors, &mut messages);
        }
    }
    if !messages.is_empty() {
        return Err(OrderRejection::Schema(messages.join(", ")));
    }

    if is_honeypot_filled(order.honeypot.as_deref()) {
        return Err(OrderRejection::Spam);
    }

    check_shipping_address(order.fulfillment_method, order.shipping_address.as_deref())
}

/// Validate a legacy single-item order
pub fn validate_order_request(order: &SingleOrder) -> Result<(), OrderRejection> {
    if let Err(errors) = order.validate() {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        return Err(OrderRejection::Schema(messages.join(", ")));
    }

    if is_honeypot_filled(order.honeypot.as_deref()) {
        return Err(OrderRejection::Spam);
    }

    check_shipping_address(order.fulfillment_method, order.shipping_address.as_deref())
}

fn is_honeypot_filled(honeypot: Option<&str>) -> bool {
    honeypot.is_some_and(|h| !h.is_empty())
}

fn check_shipping_address(
    fulfillment: FulfillmentChoice,
    address: Option<&str>,
) -> Result<(), OrderRejection> {
    if fulfillment == FulfillmentChoice::Shipping
        && address.is_none_or(|a| a.trim().is_empty())
    {
        return Err(OrderRejection::ShippingAddressRequired);
    }
    Ok(())
}

/// Flatten validation errors into human-readable messages
fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    out.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(list) => {
                for nested in list.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}
