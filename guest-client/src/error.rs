//! Client error types

use shared::RemoteFailure;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Remote call returned a non-successful envelope
    #[error(transparent)]
    Remote(#[from] RemoteFailure),

    /// QR payload could not be encoded
    #[error("QR encoding failed: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    /// QR raster could not be written as PNG
    #[error("image encoding failed: {0}")]
    ImageEncode(#[from] image::ImageError),

    /// Inbound guest link did not carry the expected route shape
    #[error("invalid guest link: {0}")]
    InvalidGuestLink(String),

    /// Guest flow invoked before the session was fully seeded
    #[error("guest session incomplete: missing {0}")]
    IncompleteSession(&'static str),

    /// IO error (QR export to disk)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
