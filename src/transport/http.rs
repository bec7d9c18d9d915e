//! HTTP transport implementation.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use super::TransportError;

/// HTTP request representation.
///
/// The search API is consumed exclusively through `GET` requests, so the
/// request shape is a path plus query parameters.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request path relative to the base URL.
    pub path: String,
    /// Query parameters, applied in order.
    pub query: Vec<(String, String)>,
    /// Request timeout override.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new GET request for a path.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            timeout: None,
        }
    }

    /// Appends a query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, keys lowercased.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Parses the `retry-after` header as whole seconds, if present.
    pub fn retry_after(&self) -> Option<Duration> {
        self.headers
            .get("retry-after")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransportImpl {
    client: Client,
    base_url: String,
}

impl HttpTransportImpl {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| TransportError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Builds the full URL for a request.
    fn build_url(&self, request: &HttpRequest) -> Result<Url, TransportError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| TransportError::InvalidResponse {
            message: format!("Invalid URL '{}': {}", raw, e),
        })?;
        url.query_pairs_mut()
            .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(url)
    }
}

#[async_trait]
impl HttpTransport for HttpTransportImpl {
    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.build_url(&request)?;

        let mut req_builder = self.client.get(url);

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout: request.timeout.unwrap_or(Duration::from_secs(10)),
                }
            } else if e.is_connect() {
                TransportError::Connection {
                    message: e.to_string(),
                }
            } else {
                TransportError::InvalidResponse {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse {
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::get("v1/search")
            .with_param("engine", "google")
            .with_param("q", "brutalist ui")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(request.path, "v1/search");
        assert_eq!(request.query.len(), 2);
        assert_eq!(request.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_build_url_encodes_query() {
        let transport =
            HttpTransportImpl::new("https://api.luvtosearch.dev", Duration::from_secs(10)).unwrap();
        let request = HttpRequest::get("v1/search")
            .with_param("engine", "google")
            .with_param("q", "black & white ui");

        let url = transport.build_url(&request).unwrap();
        assert_eq!(url.path(), "/v1/search");
        assert!(url.as_str().contains("q=black+%26+white+ui"));
    }

    #[test]
    fn test_response_is_success() {
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());

        let response = HttpResponse {
            status: 429,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        assert!(!response.is_success());
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "3".to_string());
        let response = HttpResponse {
            status: 429,
            headers,
            body: Vec::new(),
        };
        assert_eq!(response.retry_after(), Some(Duration::from_secs(3)));

        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "soon".to_string());
        let response = HttpResponse {
            status: 429,
            headers,
            body: Vec::new(),
        };
        assert_eq!(response.retry_after(), None);
    }
}
