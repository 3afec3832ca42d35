//! API route modules
//!
//! One module per HTTP resource, each exposing a `router()`:
//!
//! - [`health`] - liveness probe
//! - [`auth`] - admin login/logout
//! - [`order`] - public order intake
//! - [`requests`] - admin order-request management
//! - [`products`] - admin catalog
//! - [`variants`] - admin inventory ledger
//! - [`sales`] - admin sale recording

pub mod auth;
pub mod health;
pub mod order;
pub mod products;
pub mod requests;
pub mod sales;
pub mod variants;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
