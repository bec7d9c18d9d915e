//! Configuration module for the LuvToSearch client.
//!
//! Provides configuration management including the API key, base URL,
//! search engine selection, request timeout, and retry budget.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::errors::{SearchError, SearchResult};

/// Default base URL for the LuvToSearch search API.
pub const DEFAULT_BASE_URL: &str = "https://api.luvtosearch.dev";

/// Default search engine passed to the API.
pub const DEFAULT_ENGINE: &str = "google";

/// Default request timeout (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default maximum fetch attempts per request (1 initial + 2 retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for the search client.
#[derive(Clone)]
pub struct SearchConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Base URL for API requests.
    pub base_url: String,
    /// Search engine identifier sent as the `engine` query parameter.
    pub engine: String,
    /// Request timeout for a single network call.
    pub timeout: Duration,
    /// Maximum fetch attempts against rate-limit responses.
    pub max_attempts: u32,
}

impl SearchConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LUVSEARCH_API_KEY` (required): API key for authentication
    /// - `LUVSEARCH_BASE_URL` (optional): Custom base URL
    /// - `LUVSEARCH_TIMEOUT` (optional): Request timeout in seconds
    /// - `LUVSEARCH_MAX_ATTEMPTS` (optional): Maximum fetch attempts
    pub fn from_env() -> SearchResult<Self> {
        let api_key = std::env::var("LUVSEARCH_API_KEY").map_err(|_| {
            SearchError::configuration("LUVSEARCH_API_KEY environment variable not set")
        })?;

        let mut builder = SearchConfigBuilder::new().api_key(api_key);

        if let Ok(base_url) = std::env::var("LUVSEARCH_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("LUVSEARCH_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        if let Ok(attempts_str) = std::env::var("LUVSEARCH_MAX_ATTEMPTS") {
            if let Ok(attempts) = attempts_str.parse::<u32>() {
                builder = builder.max_attempts(attempts);
            }
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        if key.len() > 4 {
            format!("...{}", &key[key.len() - 4..])
        } else {
            "****".to_string()
        }
    }

    /// Returns the full URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("engine", &self.engine)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Builder for `SearchConfig`.
#[derive(Default)]
pub struct SearchConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    engine: Option<String>,
    timeout: Option<Duration>,
    max_attempts: Option<u32>,
}

impl SearchConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> SearchResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| {
            SearchError::configuration(format!("Environment variable {} not set", var_name))
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the search engine identifier.
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the maximum fetch attempts.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SearchResult<SearchConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| SearchError::configuration("API key is required"))?;

        if api_key.is_empty() {
            return Err(SearchError::configuration("API key cannot be empty"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("https://") {
            return Err(SearchError::configuration("Base URL must use HTTPS"));
        }

        let max_attempts = self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            return Err(SearchError::configuration(
                "max_attempts must be at least 1",
            ));
        }

        Ok(SearchConfig {
            api_key: SecretString::new(api_key),
            base_url,
            engine: self.engine.unwrap_or_else(|| DEFAULT_ENGINE.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_attempts,
        })
    }
}
