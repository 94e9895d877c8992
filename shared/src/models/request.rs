//! Guest Request Model

use serde::{Deserialize, Serialize};

/// Request status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Waiting,
    Processed,
    Rejected,
}

/// Request kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    /// Guest pressed "call staff"
    CallStaff,
    /// Guest submitted a cart for confirmation
    Order,
}

/// Guest request entity (queue item on the staff screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRequest {
    pub id: String,
    pub kind: RequestKind,
    pub status: RequestStatus,
    /// Business (tenant) reference
    pub business_id: String,
    pub area_name: Option<String>,
    pub unit_name: Option<String>,
    pub guest_name: String,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Create request payload (guest side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRequestCreate {
    pub kind: RequestKind,
    pub business_id: String,
    pub area_id: String,
    pub unit_id: String,
    pub guest_name: String,
    pub note: Option<String>,
}

/// Process request payload (staff side: accept or reject)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestProcess {
    pub status: RequestStatus,
}
