//! Service Unit Model

use serde::{Deserialize, Serialize};

/// Service unit entity (a physical table / ordering point within an area)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUnit {
    pub id: String,
    pub name: String,
    /// Area reference
    pub area_id: String,
    pub capacity: Option<i32>,
    pub is_active: bool,
}

/// Create service unit payload (inline-create flow in the QR dialog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUnitCreate {
    pub name: String,
    pub area_id: String,
    pub capacity: Option<i32>,
}
