//! Search service: a single raw fetch against the `v1/search` endpoint.
//!
//! Builds the authenticated request, sends it through the transport, and
//! classifies the response. Retry, admission, and caching live above this
//! layer in the request governor.

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::errors::{ApiErrorResponse, SearchError, SearchResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::types::SearchResponse;

/// Endpoint path for search requests.
pub const SEARCH_PATH: &str = "v1/search";

/// Search service.
pub struct SearchService {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    engine: String,
    timeout: Duration,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
        engine: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            auth,
            engine: engine.into(),
            timeout,
        }
    }

    /// Performs a single fetch for `query`.
    ///
    /// One network call, no retries. A 429 response surfaces as
    /// [`SearchError::RateLimit`] carrying any `retry-after` hint; every
    /// other failure is terminal for this attempt.
    #[instrument(skip(self), fields(engine = %self.engine))]
    pub async fn fetch(&self, query: &str) -> SearchResult<SearchResponse> {
        let mut params: Vec<(String, String)> = Vec::new();
        self.auth.apply_auth(&mut params);
        params.push(("engine".to_string(), self.engine.clone()));
        params.push(("q".to_string(), query.to_string()));

        let mut request = HttpRequest::get(SEARCH_PATH).with_timeout(self.timeout);
        request.query = params;

        let response = self
            .transport
            .send(request)
            .await
            .map_err(map_transport_error)?;

        Self::parse_response(response)
    }

    fn parse_response(response: HttpResponse) -> SearchResult<SearchResponse> {
        if response.is_success() {
            return response.json::<SearchResponse>().map_err(SearchError::from);
        }

        let message = error_message(&response);

        if response.status == http::StatusCode::TOO_MANY_REQUESTS.as_u16() {
            return Err(SearchError::rate_limit(message, response.retry_after()));
        }

        Err(SearchError::api(response.status, message))
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("engine", &self.engine)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Extracts a human-readable message from a non-2xx response body.
fn error_message(response: &HttpResponse) -> String {
    if let Ok(parsed) = response.json::<ApiErrorResponse>() {
        return parsed.error.message;
    }

    let body = String::from_utf8_lossy(&response.body);
    if body.trim().is_empty() {
        http::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.into_owned()
    }
}

fn map_transport_error(err: TransportError) -> SearchError {
    match err {
        TransportError::Timeout { timeout } => SearchError::Timeout {
            message: format!("request exceeded {:?}", timeout),
        },
        TransportError::Connection { message } => SearchError::Network {
            message,
            cause: None,
        },
        TransportError::InvalidResponse { message } => SearchError::Network {
            message,
            cause: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{fixtures, MockAuth, MockResponse, MockTransport};

    fn service(transport: Arc<MockTransport>) -> SearchService {
        SearchService::new(
            transport,
            Arc::new(MockAuth::default()),
            "google",
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_fetch_builds_authenticated_request() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::search_response(1, 0));

        let service = service(Arc::clone(&transport));
        service.fetch("brutalist ui").await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, SEARCH_PATH);
        assert_eq!(
            request.query,
            vec![
                ("api_key".to_string(), "lvs_mock_test_key".to_string()),
                ("engine".to_string(), "google".to_string()),
                ("q".to_string(), "brutalist ui".to_string()),
            ]
        );
        assert_eq!(request.timeout, Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_fetch_parses_payload() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::search_response(3, 2));

        let service = service(transport);
        let response = service.fetch("brutalist ui").await.unwrap();

        assert_eq!(response.organic_results.len(), 3);
        assert_eq!(response.inline_videos.len(), 2);
        assert!(response.summary().is_some());
    }

    #[tokio::test]
    async fn test_fetch_maps_429_with_retry_after() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::error(429, "slow down").with_header("retry-after", "3"));

        let service = service(transport);
        let err = service.fetch("q").await.unwrap_err();

        match err {
            SearchError::RateLimit {
                message,
                retry_after,
            } => {
                assert_eq!(message, "slow down");
                assert_eq!(retry_after, Some(Duration::from_secs(3)));
            }
            other => panic!("expected RateLimit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_429_without_hint() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::error(429, "slow down"));

        let service = service(transport);
        let err = service.fetch("q").await.unwrap_err();
        assert_eq!(err.retry_after(), None);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::error(503, "backend unavailable"));

        let service = service(transport);
        let err = service.fetch("q").await.unwrap_err();

        match err {
            SearchError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "backend unavailable");
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_empty_error_body_to_reason() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse {
            status: 502,
            headers: Default::default(),
            body: Vec::new(),
        });

        let service = service(transport);
        let err = service.fetch("q").await.unwrap_err();
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_fetch_maps_transport_timeout() {
        let transport = Arc::new(MockTransport::new());
        transport.fail_next(TransportError::Timeout {
            timeout: Duration::from_secs(10),
        });

        let service = service(transport);
        let err = service.fetch("q").await.unwrap_err();
        assert!(matches!(err, SearchError::Timeout { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_maps_malformed_json() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse {
            status: 200,
            headers: Default::default(),
            body: b"not json".to_vec(),
        });

        let service = service(transport);
        let err = service.fetch("q").await.unwrap_err();
        assert!(matches!(err, SearchError::Serialization { .. }));
    }
}
