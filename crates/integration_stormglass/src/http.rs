//! HTTP transport used by the StormGlass client
//!
//! The client only needs a JSON `GET`. [`HttpClient`] captures that
//! capability so tests and embedding applications can supply their own
//! transport; [`ReqwestHttpClient`] is the default one.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::HttpError;

/// Outbound `GET` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters, sent in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a request for `url` with no parameters or headers
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header by name (case-insensitive)
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// JSON `GET` capability
///
/// Implementations return the decoded body for 2xx responses. Any other
/// outcome is an [`HttpError`]; when the server answered, the error carries
/// its status and body.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a `GET` request and decode the JSON body
    async fn get(&self, request: &HttpRequest) -> Result<serde_json::Value, HttpError>;
}

/// [`HttpClient`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a client with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::transport(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Decode an error body: JSON when possible, else the raw text
    fn parse_error_body(text: &str) -> serde_json::Value {
        if text.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get(&self, request: &HttpRequest) -> Result<serde_json::Value, HttpError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "Received response");

        let text = response
            .text()
            .await
            .map_err(|e| HttpError::transport(e.to_string()))?;

        if !status.is_success() {
            return Err(HttpError::with_response(
                format!("Request failed with status code {}", status.as_u16()),
                status.as_u16(),
                Self::parse_error_body(&text),
            ));
        }

        serde_json::from_str(&text)
            .map_err(|e| HttpError::transport(format!("Invalid JSON response: {e}")))
    }
}
