//! LuvToSearch API client.
//!
//! Wires configuration, transport, auth, cache, admission control, and the
//! retry policy into a [`RequestGovernor`] behind a single facade. The
//! client is constructed once at startup and shared; every call site goes
//! through the same cache and admission window.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuth, AuthProvider};
use crate::cache::ResponseCache;
use crate::config::{SearchConfig, SearchConfigBuilder};
use crate::errors::{SearchError, SearchResult};
use crate::governor::{InterestToken, RequestGovernor};
use crate::observability::{
    Logger, MetricsCollector, Observability, ObservabilityConfig, SearchMetrics,
};
use crate::resilience::{AdmissionConfig, AdmissionController, RetryConfig, RetryPolicy};
use crate::services::SearchService;
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::SearchResponse;

/// The main LuvToSearch client.
///
/// # Example
///
/// ```rust,no_run
/// use luvsearch_client::SearchClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SearchClient::builder()
///         .api_key("lvs_your_api_key")
///         .build()?;
///
///     let response = client.search("brutalist ui").await?;
///     for result in &response.organic_results {
///         println!("{} — {}", result.title, result.link);
///     }
///     Ok(())
/// }
/// ```
pub struct SearchClient {
    config: SearchConfig,
    governor: Arc<RequestGovernor>,
    observability: Arc<Observability>,
}

impl SearchClient {
    /// Creates a new client builder.
    pub fn builder() -> SearchClientBuilder {
        SearchClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `LUVSEARCH_API_KEY` and optionally `LUVSEARCH_BASE_URL`,
    /// `LUVSEARCH_TIMEOUT`, and `LUVSEARCH_MAX_ATTEMPTS`.
    pub fn from_env() -> SearchResult<Self> {
        let config = SearchConfig::from_env()?;
        SearchClientBuilder::from_config(config).build()
    }

    /// Creates a client from an API key with default settings.
    pub fn from_api_key(api_key: impl Into<String>) -> SearchResult<Self> {
        SearchClientBuilder::new().api_key(api_key).build()
    }

    /// Resolves a query through the request governor.
    pub async fn search(&self, query: &str) -> SearchResult<Arc<SearchResponse>> {
        self.governor.resolve(query).await
    }

    /// Resolves a query, delivering the outcome only while `interest` is
    /// still live. See [`RequestGovernor::resolve_with_interest`].
    pub async fn search_with_interest(
        &self,
        query: &str,
        interest: &InterestToken,
    ) -> Option<SearchResult<Arc<SearchResponse>>> {
        self.governor.resolve_with_interest(query, interest).await
    }

    /// Returns the request governor.
    pub fn governor(&self) -> &Arc<RequestGovernor> {
        &self.governor
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns a snapshot of collected metrics.
    pub fn metrics(&self) -> SearchMetrics {
        self.observability.metrics().get_metrics()
    }

    /// Returns the observability facade.
    pub fn observability(&self) -> &Arc<Observability> {
        &self.observability
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for `SearchClient`.
pub struct SearchClientBuilder {
    config_builder: SearchConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
    retry_config: Option<RetryConfig>,
    admission_config: AdmissionConfig,
    cache_ttl: Duration,
    logger: Option<Arc<dyn Logger>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
    observability_config: ObservabilityConfig,
}

impl SearchClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: SearchConfigBuilder::new(),
            transport: None,
            auth: None,
            retry_config: None,
            admission_config: AdmissionConfig::default(),
            cache_ttl: crate::cache::DEFAULT_TTL,
            logger: None,
            metrics: None,
            observability_config: ObservabilityConfig::default(),
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: SearchConfig) -> Self {
        let mut builder = Self::new();
        builder.config_builder = SearchConfigBuilder::new()
            .api_key(config.api_key())
            .base_url(&config.base_url)
            .engine(&config.engine)
            .timeout(config.timeout)
            .max_attempts(config.max_attempts);
        builder
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the search engine identifier.
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.engine(engine);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the maximum fetch attempts.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config_builder = self.config_builder.max_attempts(attempts);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the retry configuration.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = Some(config);
        self
    }

    /// Sets the admission control configuration.
    pub fn admission(mut self, config: AdmissionConfig) -> Self {
        self.admission_config = config;
        self
    }

    /// Sets the cache time-to-live.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets a custom logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets a custom metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Sets the observability configuration.
    pub fn observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = config;
        self
    }

    /// Builds the client.
    pub fn build(self) -> SearchResult<SearchClient> {
        let config = self.config_builder.build()?;

        if self.admission_config.max_requests == 0 {
            return Err(SearchError::configuration(
                "admission max_requests must be at least 1",
            ));
        }

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout).map_err(|e| {
                    SearchError::configuration(e.to_string())
                })?,
            ),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => Arc::new(ApiKeyAuth::from_string(config.api_key())),
        };
        auth.validate()?;

        let retry_config = self
            .retry_config
            .unwrap_or_else(|| RetryConfig::default().max_attempts(config.max_attempts));

        let observability = match (self.logger, self.metrics) {
            (None, None) => Arc::new(Observability::new(self.observability_config)),
            (logger, metrics) => {
                let defaults = Observability::new(self.observability_config.clone());
                Arc::new(Observability::with_components(
                    logger.unwrap_or_else(|| Arc::clone(defaults.logger())),
                    metrics.unwrap_or_else(|| Arc::clone(defaults.metrics())),
                    self.observability_config,
                ))
            }
        };

        let service = SearchService::new(
            Arc::clone(&transport),
            Arc::clone(&auth),
            config.engine.clone(),
            config.timeout,
        );

        let governor = Arc::new(RequestGovernor::new(
            service,
            Arc::new(ResponseCache::new(self.cache_ttl)),
            Arc::new(AdmissionController::new(self.admission_config)),
            RetryPolicy::new(retry_config),
            Arc::clone(&observability),
        ));

        Ok(SearchClient {
            config,
            governor,
            observability,
        })
    }
}

impl Default for SearchClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{fixtures, MockTransport};

    #[test]
    fn test_build_with_defaults() {
        let client = SearchClient::from_api_key("lvs_test_key").unwrap();
        assert_eq!(client.config().engine, "google");
        assert_eq!(client.config().max_attempts, 3);
    }

    #[test]
    fn test_build_requires_api_key() {
        assert!(SearchClient::builder().build().is_err());
    }

    #[test]
    fn test_build_rejects_zero_admission() {
        let result = SearchClient::builder()
            .api_key("lvs_test_key")
            .admission(AdmissionConfig::new(0, Duration::from_secs(60)))
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_search_delegates_to_governor() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::search_response(2, 1));

        let client = SearchClient::builder()
            .api_key("lvs_test_key")
            .transport(transport)
            .build()
            .unwrap();

        let response = client.search("monochrome palette").await.unwrap();
        assert_eq!(response.organic_results.len(), 2);

        let metrics = client.metrics();
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.cache_misses, 1);

        // Second call is served from the cache.
        client.search("monochrome palette").await.unwrap();
        let metrics = client.metrics();
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_search_with_interest_delegates() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::search_response(1, 0));

        let client = SearchClient::builder()
            .api_key("lvs_test_key")
            .transport(transport)
            .build()
            .unwrap();

        let interest = InterestToken::new();
        let outcome = client.search_with_interest("q", &interest).await;
        assert!(outcome.is_some());
    }
}
