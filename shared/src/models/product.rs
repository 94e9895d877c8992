//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity as the guest menu consumes it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    /// Category reference
    pub category_id: String,
    /// Subcategory reference (optional level in the category chain)
    pub subcategory_id: Option<String>,
    pub description: Option<String>,
    /// Size/spec variants; at least one, first is the default
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Add-on options, each with its own surcharge
    #[serde(default)]
    pub options: Vec<ProductOption>,
    pub is_active: bool,
}

/// Product variant (size/specification with its resolved price)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub name: String,
    /// Price in currency unit
    pub price: f64,
}

/// Product add-on option
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOption {
    pub name: String,
    /// Surcharge in currency unit, added on top of the variant price
    pub surcharge: f64,
}
