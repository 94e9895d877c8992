//! Data models
//!
//! Shared between the guest ordering flow and the operator screens.
//! All IDs are opaque `String`s handed out by the backend; the client never
//! derives meaning from them.

pub mod area;
pub mod branch;
pub mod category;
pub mod order;
pub mod product;
pub mod request;
pub mod select_option;
pub mod service_unit;

// Re-exports
pub use area::*;
pub use branch::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use request::*;
pub use select_option::*;
pub use service_unit::*;
