//! Passthrough HTTP client for a real backend.
//!
//! The mock path never touches this. It exists so the same envelope-shaped
//! calls can be pointed at `{base_url}{endpoint}` once a server exists.

use log::{debug, info, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::provider::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Sends `Authorization: Bearer <token>` on every request when set.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a JSON request and decodes the JSON response body.
    ///
    /// Non-2xx statuses become [`ApiError::Transport`], connection failures
    /// [`ApiError::Network`], undecodable bodies [`ApiError::Parse`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        info!("API request: {} {}", method, url);

        let mut builder = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("[API Error] {}", e);
            ApiError::Network(e.to_string())
        })?;

        debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("[API Error] HTTP {} - {}", status, message);
            return Err(ApiError::Transport { status, message });
        }

        response.json::<T>().await.map_err(|e| {
            warn!("[API Error] bad body: {}", e);
            ApiError::Parse(e.to_string())
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, endpoint: &str, body: &Value) -> Result<T, ApiError> {
        self.request(Method::POST, endpoint, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://example.com/api/v1/");
        assert_eq!(client.base_url(), "http://example.com/api/v1");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) on localhost is not expected to be listening
        let client = ApiClient::new("http://127.0.0.1:9");
        let result: Result<Value, ApiError> = client.get("/machines").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
