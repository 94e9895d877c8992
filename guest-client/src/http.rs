//! HTTP client for the ordering backend
//!
//! Thin wrapper over reqwest that deserializes every body into the
//! [`ApiResponse`] envelope and converts it into a tagged result, so the
//! layers above never compare raw status numbers.

use crate::{ClientConfig, ClientError, ClientResult};
use serde::de::DeserializeOwned;
use shared::{ApiResponse, RemoteFailure};

/// HTTP client for making envelope-based requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token (operator screens)
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request, returning the envelope payload
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a JSON body, returning the envelope payload
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// GET where the payload is required
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get(path)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing data for GET {}", path)))
    }

    /// POST where the payload is required (created entity echo)
    pub async fn post_data<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.post(path, body)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing data for POST {}", path)))
    }

    /// POST where no payload is expected back
    pub async fn post_ack<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let _: Option<serde_json::Value> = self.post(path, body).await?;
        Ok(())
    }

    /// Normalize the HTTP response into the envelope's tagged result.
    ///
    /// The body is parsed as an envelope regardless of transport status; a
    /// non-2xx transport status with an unparseable body still produces a
    /// `RemoteFailure` so the caller's pending-state UI can reset.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<Option<T>> {
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<ApiResponse<T>>(&text) {
            Ok(envelope) => envelope.into_result().map_err(ClientError::Remote),
            Err(_) if !status.is_success() => Err(ClientError::Remote(RemoteFailure::new(
                status.as_u16(),
                "HTTP_ERROR",
                text,
            ))),
            Err(e) => Err(ClientError::InvalidResponse(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_trims_slashes() {
        let client = HttpClient::new(&ClientConfig::new("http://api/")).unwrap();
        assert_eq!(client.url("/v1/areas"), "http://api/v1/areas");
        assert_eq!(client.url("v1/areas"), "http://api/v1/areas");
    }
}
