//! Client configuration

use std::time::Duration;

use qrcode::EcLevel;
use rust_decimal::Decimal;

/// Default tax rate applied to cart totals (8.25%)
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(825, 0, 0, false, 4);

/// Default polling cadence for the request queue
pub const DEFAULT_REQUEST_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default polling cadence for the order queue
pub const DEFAULT_ORDER_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Client configuration for talking to the ordering backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.example.com")
    pub base_url: String,

    /// Public origin QR links point at (e.g., "https://order.example.com")
    pub public_origin: String,

    /// First path segment of the unauthenticated guest route
    pub guest_prefix: String,

    /// Bearer token for operator calls; guest calls carry none
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Tax rate applied on top of the cart subtotal
    pub tax_rate: Decimal,

    /// Polling cadence for the request queue
    pub request_poll_interval: Duration,

    /// Polling cadence for the order queue
    pub order_poll_interval: Duration,

    /// QR error-correction level
    pub qr_ec_level: EcLevel,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            public_origin: base_url.clone(),
            base_url,
            guest_prefix: "unauth".to_string(),
            token: None,
            timeout: 30,
            tax_rate: DEFAULT_TAX_RATE,
            request_poll_interval: DEFAULT_REQUEST_POLL_INTERVAL,
            order_poll_interval: DEFAULT_ORDER_POLL_INTERVAL,
            qr_ec_level: EcLevel::H,
        }
    }

    /// Set the public origin used in QR links
    pub fn with_public_origin(mut self, origin: impl Into<String>) -> Self {
        self.public_origin = origin.into();
        self
    }

    /// Set the guest route prefix
    pub fn with_guest_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.guest_prefix = prefix.into();
        self
    }

    /// Set the bearer token for operator calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the tax rate
    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Set both polling intervals
    pub fn with_poll_intervals(mut self, requests: Duration, orders: Duration) -> Self {
        self.request_poll_interval = requests;
        self.order_poll_interval = orders;
        self
    }

    /// Set the QR error-correction level
    pub fn with_qr_ec_level(mut self, level: EcLevel) -> Self {
        self.qr_ec_level = level;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rate_is_8_25_percent() {
        use std::str::FromStr;
        assert_eq!(DEFAULT_TAX_RATE, Decimal::from_str("0.0825").unwrap());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://api")
            .with_public_origin("https://order.example.com")
            .with_timeout(5)
            .with_qr_ec_level(EcLevel::M);
        assert_eq!(config.public_origin, "https://order.example.com");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.qr_ec_level, EcLevel::M);
        assert_eq!(config.guest_prefix, "unauth");
    }
}
