//! Area Model

use serde::{Deserialize, Serialize};

/// Area entity (a seating zone within a branch: hall, terrace, private room)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    /// Branch reference
    pub branch_id: String,
    pub description: Option<String>,
}

/// Create area payload (used by the inline-create flow in the QR dialog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaCreate {
    pub name: String,
    pub branch_id: String,
    pub description: Option<String>,
}
