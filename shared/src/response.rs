//! API Response types
//!
//! Every remote call returns the same envelope shape:
//!
//! ```json
//! {
//!     "status": 200,
//!     "data": { ... },
//!     "error": "SOME_CODE",
//!     "errorMessage": "Human readable description"
//! }
//! ```
//!
//! Status 200/201 means success. Callers never inspect the raw status;
//! [`ApiResponse::into_result`] converts the envelope into a tagged result
//! so the client layer pattern-matches instead of comparing magic numbers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope statuses treated as success
pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Numeric status (200/201 = success, anything else = failure)
    pub status: u16,
    /// Response payload (absent on failure and on bodyless writes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable error description
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// A remote call that came back non-successful
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("remote failure ({status}/{code}): {message}")]
pub struct RemoteFailure {
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl RemoteFailure {
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            data: Some(data),
            error: None,
            error_message: None,
        }
    }

    /// Create a successful creation response
    pub fn created(data: T) -> Self {
        Self {
            status: STATUS_CREATED,
            data: Some(data),
            error: None,
            error_message: None,
        }
    }

    /// Create an error response
    pub fn error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            data: None,
            error: Some(code.into()),
            error_message: Some(message.into()),
        }
    }

    /// Whether the envelope carries a successful status
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK || self.status == STATUS_CREATED
    }

    /// Convert the envelope into a tagged result.
    ///
    /// Success yields `Ok(Some(data))`, or `Ok(None)` for bodyless writes.
    /// Failure yields the error code and message; a missing code falls back
    /// to `"UNKNOWN"` so callers always have something to log.
    pub fn into_result(self) -> Result<Option<T>, RemoteFailure> {
        if self.is_success() {
            return Ok(self.data);
        }
        Err(RemoteFailure {
            status: self.status,
            code: self.error.unwrap_or_else(|| "UNKNOWN".to_string()),
            message: self.error_message.unwrap_or_default(),
        })
    }
}

impl<T: Default> ApiResponse<T> {
    /// Success payload, or the type's default for failed read paths
    pub fn data_or_default(self) -> T {
        match self.into_result() {
            Ok(Some(data)) => data,
            _ => T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_into_result() {
        let resp = ApiResponse::ok(vec![1, 2, 3]);
        assert!(resp.is_success());
        assert_eq!(resp.into_result().unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_created_counts_as_success() {
        let resp = ApiResponse::created("a1".to_string());
        assert!(resp.is_success());
    }

    #[test]
    fn test_error_envelope_into_result() {
        let resp: ApiResponse<()> = ApiResponse::error(422, "VALIDATION", "name required");
        let failure = resp.into_result().unwrap_err();
        assert_eq!(failure.status, 422);
        assert_eq!(failure.code, "VALIDATION");
        assert_eq!(failure.message, "name required");
    }

    #[test]
    fn test_data_or_default_on_failure() {
        let resp: ApiResponse<Vec<String>> = ApiResponse::error(500, "INTERNAL", "boom");
        assert!(resp.data_or_default().is_empty());
    }

    #[test]
    fn test_wire_shape_camel_case() {
        let resp: ApiResponse<()> = ApiResponse::error(404, "NOT_FOUND", "no such area");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["errorMessage"], "no such area");
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn test_missing_error_code_falls_back() {
        let raw = r#"{"status": 500}"#;
        let resp: ApiResponse<()> = serde_json::from_str(raw).unwrap();
        let failure = resp.into_result().unwrap_err();
        assert_eq!(failure.code, "UNKNOWN");
    }
}
