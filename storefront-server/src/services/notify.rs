//! Order notification dispatch
//!
//! Escalation chain: primary transactional-email provider, then the
//! webhook gateway, then a structured log record - an accepted order is
//! never silently invisible to the shop owner, even with zero providers
//! configured. Delivery failure is never fatal to the caller; the HTTP
//! response to the customer does not depend on it.

use serde::Serialize;

use crate::db::models::OrderRequestCreate;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Notification provider configuration (all optional except addressing)
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Primary provider API key (Resend-style transactional email)
    pub resend_api_key: Option<String>,
    /// Secondary provider: webhook endpoint receiving the order as JSON
    pub webhook_url: Option<String>,
    /// Owner address for new-order notifications
    pub order_to_email: String,
    /// From address for outgoing mail
    pub from_address: String,
    /// Public site URL referenced in notification content
    pub site_url: String,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            resend_api_key: std::env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty()),
            webhook_url: std::env::var("ORDER_WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
            order_to_email: std::env::var("ORDER_TO_EMAIL")
                .unwrap_or_else(|_| "orders@blackcatbuttondown.com".into()),
            from_address: std::env::var("ORDER_FROM_ADDRESS")
                .unwrap_or_else(|_| "Black Cat Button Down <orders@blackcatbuttondown.com>".into()),
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://blackcatbuttondown.com".into()),
        }
    }
}

/// Which step of the chain handled the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyChannel {
    Primary,
    Secondary,
    LoggedOnly,
}

/// Result of a dispatch attempt
#[derive(Debug, Clone, Copy)]
pub struct NotificationOutcome {
    pub delivered: bool,
    pub channel: NotifyChannel,
}

/// Order notification dispatcher
#[derive(Debug, Clone)]
pub struct NotificationService {
    config: NotifyConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl NotificationService {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Notify owner and customer about an accepted order request.
    ///
    /// Tries each configured channel in turn; earlier failures are logged
    /// and the next channel is attempted. Never returns an error.
    pub async fn send_order_notifications(
        &self,
        order: &OrderRequestCreate,
    ) -> NotificationOutcome {
        if self.config.resend_api_key.is_some() {
            match self.send_with_resend(order).await {
                Ok(()) => {
                    return NotificationOutcome {
                        delivered: true,
                        channel: NotifyChannel::Primary,
                    };
                }
                Err(e) => tracing::warn!(error = %e, "Primary email provider failed"),
            }
        }

        if self.config.webhook_url.is_some() {
            match self.send_webhook(order).await {
                Ok(()) => {
                    return NotificationOutcome {
                        delivered: true,
                        channel: NotifyChannel::Secondary,
                    };
                }
                Err(e) => tracing::warn!(error = %e, "Webhook notification failed"),
            }
        }

        tracing::warn!("No notification provider configured - logging order");
        self.log_order(order);
        NotificationOutcome {
            delivered: true,
            channel: NotifyChannel::LoggedOnly,
        }
    }

    async fn send_with_resend(&self, order: &OrderRequestCreate) -> Result<(), String> {
        let api_key = self
            .config
            .resend_api_key
            .as_deref()
            .ok_or("RESEND_API_KEY not configured")?;

        let details = format_order_details(order, &self.config.site_url);
        let subject = format!("New Order Request: {}", order_headline(order));

        // Owner notification
        self.post_email(
            api_key,
            &EmailRequest {
                from: &self.config.from_address,
                to: &self.config.order_to_email,
                subject: &subject,
                text: &details,
            },
        )
        .await?;

        // Customer confirmation
        let confirmation = format!(
            "We've got your request, {}.\n\n\
             Thanks for reaching out. We'll review your order and get back to you \
             within 24-48 hours to confirm availability and next steps.\n\n\
             {}\n\n— The Black Cat Team\n{}",
            first_name(&order.customer_name),
            details,
            self.config.site_url,
        );
        self.post_email(
            api_key,
            &EmailRequest {
                from: &self.config.from_address,
                to: &order.email,
                subject: "Order Request Received - Black Cat Button Down",
                text: &confirmation,
            },
        )
        .await?;

        Ok(())
    }

    async fn post_email(&self, api_key: &str, email: &EmailRequest<'_>) -> Result<(), String> {
        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("Email API returned {}", response.status()));
        }
        Ok(())
    }

    async fn send_webhook(&self, order: &OrderRequestCreate) -> Result<(), String> {
        let url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or("ORDER_WEBHOOK_URL not configured")?;

        let payload = serde_json::json!({
            "event": "order_request.created",
            "customerName": order.customer_name,
            "email": order.email,
            "phone": order.phone,
            "fulfillmentMethod": order.fulfillment_method,
            "shippingAddress": order.shipping_address,
            "notes": order.notes,
            "items": order.items.iter().map(|item| serde_json::json!({
                "productSlug": item.product_slug,
                "productName": item.product_name,
                "size": item.variant_size,
                "quantity": item.quantity,
                "price": item.price,
            })).collect::<Vec<_>>(),
        });

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("Webhook returned {}", response.status()));
        }
        Ok(())
    }

    fn log_order(&self, order: &OrderRequestCreate) {
        tracing::info!(
            target: "orders",
            customer = %order.customer_name,
            email = %order.email,
            items = order.items.len(),
            "NEW ORDER REQUEST (no email sent)\n{}",
            format_order_details(order, &self.config.site_url)
        );
    }
}

fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// Subject line: the single product for legacy orders, an item count for carts
fn order_headline(order: &OrderRequestCreate) -> String {
    match order.items.as_slice() {
        [only] => only.product_name.clone(),
        items => {
            let count: i64 = items.iter().map(|item| item.quantity).sum();
            format!("{count} items")
        }
    }
}

/// Plain-text order summary shared by every channel
fn format_order_details(order: &OrderRequestCreate, site_url: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", order.customer_name);
    let _ = writeln!(out, "Email: {}", order.email);
    let _ = writeln!(
        out,
        "Phone: {}",
        order.phone.as_deref().unwrap_or("Not provided")
    );
    let _ = writeln!(out);
    for item in &order.items {
        let price = item
            .price
            .map(|cents| format!(" @ ${}.{:02}", cents / 100, cents % 100))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} x{} (size {}){}",
            item.product_name, item.quantity, item.variant_size, price
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Fulfillment: {:?}", order.fulfillment_method);
    if let Some(address) = &order.shipping_address {
        let _ = writeln!(out, "Shipping Address: {address}");
    }
    let _ = writeln!(
        out,
        "Notes: {}",
        order.notes.as_deref().unwrap_or("None")
    );
    let _ = write!(out, "\nSubmitted via {site_url}");
    out
}
