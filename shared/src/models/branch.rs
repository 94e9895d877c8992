//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity (a physical outlet of the business)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
}
