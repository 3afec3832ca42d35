//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (admin catalog; the public read path serves static data)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Product type, e.g. "button-down" (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub description: Option<String>,
}

fn default_kind() -> String {
    "button-down".to_string()
}
