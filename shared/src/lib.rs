//! Shared types for the qrdine client
//!
//! Wire envelope and domain models used by the guest ordering flow and the
//! operator screens. These types mirror what the backend returns; they carry
//! no behavior beyond envelope-to-result conversion.

pub mod models;
pub mod response;

pub use response::{ApiResponse, RemoteFailure};
