//! Service Module
//!
//! Process-level collaborators used by the API layer:
//! - [`RateLimiter`] - fixed-window request throttle
//! - [`NotificationService`] - order notification escalation chain

pub mod notify;
pub mod rate_limit;

pub use notify::{NotificationOutcome, NotificationService, NotifyChannel, NotifyConfig};
pub use rate_limit::{RateLimitConfig, RateLimitDecision, RateLimiter, client_identifier};
