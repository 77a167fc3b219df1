//! Reqwest-based resource client.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use super::classify;
use crate::TRACING_TARGET_HTTP;
use crate::config::PineconeConfig;
use crate::error::{Error, Result};

/// Inner client that holds the HTTP client and its base URL.
struct HttpClientInner {
    http: Client,
    base_url: String,
}

/// Request executor bound to one base URL.
///
/// The header set and timeout come from the [`PineconeConfig`] snapshot the
/// underlying reqwest client was built with. Cloning is cheap and shares the
/// connection pool. Nothing here retries: one call, one request.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Builds the reqwest client shared by every resource of one config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the TLS backend cannot be initialized.
    pub fn build_transport(config: &PineconeConfig) -> Result<Client> {
        tracing::debug!(
            target: TRACING_TARGET_HTTP,
            timeout_secs = config.timeout_secs(),
            "Creating reqwest client"
        );

        Client::builder()
            .timeout(config.timeout())
            .default_headers(config.headers().clone())
            .build()
            .map_err(|e| Error::from(e).with_operation("Failed to create HTTP client"))
    }

    /// Creates a resource client for `base_url` on top of a shared transport.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let inner = HttpClientInner { http, base_url };
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates a resource client with a transport of its own.
    pub fn from_config(config: &PineconeConfig, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Self::build_transport(config)?, base_url))
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Sends a GET request.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute::<()>(Method::GET, path, None).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Sends a PATCH request with a JSON body.
    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PATCH, path, Some(body)).await
    }

    /// Sends a DELETE request without a body.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute::<()>(Method::DELETE, path, None).await
    }

    /// Sends one request and classifies the response.
    ///
    /// `path` starts with `/` and may carry a query string. The body, when
    /// present, is serialized as JSON; the `Content-Type` header comes from
    /// the configured header set so callers can override it.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut request = self.inner.http.request(method.clone(), &url);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                Error::validation(format!("Failed to serialize request body: {e}"))
            })?;
            request = request.body(bytes);
        }

        tracing::debug!(
            target: TRACING_TARGET_HTTP,
            method = %method,
            url = %url,
            "Sending request"
        );

        let started_at = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET_HTTP,
                method = %method,
                url = %url,
                error = %e,
                elapsed_ms = started_at.elapsed().as_millis(),
                "Request failed before a response was received"
            );
            Error::from(e)
        })?;

        let status_code = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(
            target: TRACING_TARGET_HTTP,
            method = %method,
            url = %url,
            status_code,
            elapsed_ms = started_at.elapsed().as_millis(),
            "Received response"
        );

        classify(status_code, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientOptions;

    fn config() -> PineconeConfig {
        PineconeConfig::new("test-key", ClientOptions::default()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::from_config(&config(), "https://example.com/").unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_clones_share_transport() {
        let transport = HttpClient::build_transport(&config()).unwrap();
        let a = HttpClient::new(transport.clone(), "https://a.example.com");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let client = HttpClient::from_config(&config(), "http://127.0.0.1:9").unwrap();
        let error = client.get("/indexes").await.unwrap_err();
        assert!(error.is_transport(), "unexpected error: {error:?}");
    }
}
