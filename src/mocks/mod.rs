//! Mock implementations for testing.
//!
//! Provides a mock transport and auth provider for unit testing the request
//! path without touching the network, plus fixtures for common payloads.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::auth::AuthProvider;
use crate::errors::SearchResult;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
///
/// Responses are consumed in FIFO order; when the queue is empty the default
/// response (or a 500) is served. Every request is recorded for inspection.
pub struct MockTransport {
    outcomes: Mutex<Vec<MockOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

enum MockOutcome {
    Respond(MockResponse),
    Fail(TransportError),
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path.
    pub path: String,
    /// Query parameters in application order.
    pub query: Vec<(String, String)>,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates an error response with the API's error body shape.
    pub fn error(status: u16, message: &str) -> Self {
        let error = serde_json::json!({
            "error": {
                "message": message,
                "code": "error"
            }
        });

        let body = serde_json::to_vec(&error).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a 429 response carrying a `retry-after` hint in seconds.
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::error(429, "too many requests")
            .with_header("retry-after", &retry_after_secs.to_string())
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push(MockOutcome::Respond(response));
        }
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a transport-level failure.
    pub fn fail_next(&self, error: TransportError) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push(MockOutcome::Fail(error));
        }
    }

    /// Sets the default response served when the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        if let Ok(mut default) = self.default_response.lock() {
            *default = Some(response);
        }
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().ok()?.last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn next_outcome(&self) -> MockOutcome {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            if !outcomes.is_empty() {
                return outcomes.remove(0);
            }
        }

        let default = self
            .default_response
            .lock()
            .ok()
            .and_then(|d| d.clone())
            .unwrap_or_else(|| MockResponse::error(500, "No mock response configured"));
        MockOutcome::Respond(default)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                path: request.path.clone(),
                query: request.query.clone(),
                timeout: request.timeout,
            });
        }

        match self.next_outcome() {
            MockOutcome::Respond(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockOutcome::Fail(error) => Err(error),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Mock auth provider for testing.
pub struct MockAuth {
    api_key: String,
}

impl MockAuth {
    /// Creates a new mock auth provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("lvs_mock_test_key")
    }
}

impl AuthProvider for MockAuth {
    fn apply_auth(&self, params: &mut Vec<(String, String)>) {
        params.push(("api_key".to_string(), self.api_key.clone()));
    }

    fn scheme(&self) -> &str {
        "api_key"
    }

    fn validate(&self) -> SearchResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for MockAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuth").finish()
    }
}

/// Test fixtures for common response payloads.
pub mod fixtures {
    use crate::types::{AiOverview, InlineVideo, OrganicResult, SearchResponse, TextBlock};

    /// Creates a search response with the given number of organic results
    /// and inline videos, plus an AI overview.
    pub fn search_response(organic: usize, videos: usize) -> SearchResponse {
        SearchResponse {
            organic_results: (0..organic)
                .map(|i| OrganicResult {
                    title: format!("Result {}", i + 1),
                    snippet: Some(format!("Snippet for result {}", i + 1)),
                    link: format!("https://example.com/{}", i + 1),
                    source: Some("example.com".to_string()),
                })
                .collect(),
            inline_videos: (0..videos)
                .map(|i| InlineVideo {
                    title: format!("Video {}", i + 1),
                    link: format!("https://videos.example/{}", i + 1),
                    image: Some(format!("https://img.example/{}.jpg", i + 1)),
                    source: Some("YouTube".to_string()),
                    length: Some("10:24".to_string()),
                })
                .collect(),
            ai_overview: Some(AiOverview {
                text_blocks: vec![TextBlock {
                    answer: Some("A concise overview of the topic.".to_string()),
                }],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_queue() {
        let transport = MockTransport::new();
        transport.queue_json(&serde_json::json!({"organic_results": []}));

        let response = transport.send(HttpRequest::get("v1/search")).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new();
        transport.set_default(MockResponse::json(&serde_json::json!({})));

        transport
            .send(HttpRequest::get("v1/search").with_param("q", "one"))
            .await
            .unwrap();
        transport
            .send(HttpRequest::get("v1/search").with_param("q", "two"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query[0].1, "one");
        assert_eq!(requests[1].query[0].1, "two");
    }

    #[tokio::test]
    async fn test_mock_transport_fail_next() {
        let transport = MockTransport::new();
        transport.fail_next(TransportError::Connection {
            message: "refused".to_string(),
        });

        let result = transport.send(HttpRequest::get("v1/search")).await;
        assert!(result.is_err());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_response_carries_hint() {
        let transport = MockTransport::new();
        transport.queue(MockResponse::rate_limited(3));

        let response = transport.send(HttpRequest::get("v1/search")).await.unwrap();
        assert_eq!(response.status, 429);
        assert_eq!(
            response.retry_after(),
            Some(std::time::Duration::from_secs(3))
        );
    }

    #[test]
    fn test_fixture_shape() {
        let response = fixtures::search_response(3, 2);
        assert_eq!(response.organic_results.len(), 3);
        assert_eq!(response.inline_videos.len(), 2);
        assert!(response.summary().is_some());
    }
}
