//! Database Models
//!
//! Plain serde + `sqlx::FromRow` structs with `Create`/`Update` payload
//! companions. IDs are snowflake-style i64, timestamps epoch milliseconds.

pub mod order_request;
pub mod product;
pub mod sale;
pub mod variant;

pub use order_request::{
    FulfillmentMethod, OrderRequest, OrderRequestCreate, OrderRequestItem,
    OrderRequestItemCreate, OrderRequestWithItems, RequestStatus,
};
pub use product::{Product, ProductCreate};
pub use sale::{
    Sale, SaleChannel, SaleCreate, SaleLineItem, SaleLineItemCreate, SaleWithLineItems,
};
pub use variant::{CounterField, Variant, VariantAdjust, VariantCreate, VariantWithProduct};
