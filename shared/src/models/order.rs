//! Order Model

use serde::{Deserialize, Serialize};

/// Order status as the queue screens display it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
    Completed,
    Cancelled,
}

/// Order line as submitted from the guest cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    /// Resolved unit price (variant + option surcharges), currency unit
    pub unit_price: f64,
    pub quantity: i32,
    pub variant: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub note: Option<String>,
}

/// Order summary entity (queue item on the staff screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub status: OrderStatus,
    pub business_id: String,
    pub area_name: Option<String>,
    pub unit_name: Option<String>,
    pub guest_name: String,
    /// Total amount in currency unit
    pub total: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Create order payload (guest checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub business_id: String,
    pub area_id: String,
    pub unit_id: String,
    pub guest_name: String,
    pub lines: Vec<OrderLine>,
}
