//! Guest Client - client core for QR table ordering
//!
//! Holds the browser-tab-scoped state of the guest ordering flow (cart and
//! session stores), the cascading dependent-selector protocol shared by the
//! QR and product dialogs, the polling refresh for the request/order
//! queues, and the QR export flow for operators.

pub mod api;
pub mod cart;
pub mod cascade;
pub mod config;
pub mod error;
pub mod http;
pub mod money;
pub mod notify;
pub mod polling;
pub mod qr;
pub mod session;

pub use api::{OrderingApi, has_permission, or_empty};
pub use cart::{CartEvent, CartItem, CartItemInput, CartStore};
pub use cascade::{ChainLink, OptionSource, SelectChain};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use notify::{Notifier, TracingNotifier};
pub use polling::{ListPoller, QueryInvalidator, RefreshHandle};
pub use qr::{QrExport, QrExporter, QrFormat, menu_url};
pub use session::{GuestContext, GuestSession};

// Re-export shared types for convenience
pub use shared::{ApiResponse, RemoteFailure};
