//! Error types for the LuvToSearch client.
//!
//! Provides the error taxonomy for the search request path: invalid input,
//! rate limiting, timeouts, transport failures, and API-level errors.

use std::error::Error as _;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Comprehensive error type for search client operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration error (missing API key, invalid base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The query was rejected before any I/O occurred.
    #[error("Invalid query: {message}")]
    InvalidQuery {
        /// Error message describing why the query was rejected.
        message: String,
    },

    /// A single rate-limit response (HTTP 429) from the search API.
    ///
    /// This is the only retryable error. The retry policy consumes it
    /// internally; callers of the governor see [`SearchError::RateLimited`]
    /// once attempts are exhausted.
    #[error("Rate limit response: {message}")]
    RateLimit {
        /// Error message from the API.
        message: String,
        /// Server-supplied wait duration from the `retry-after` header.
        retry_after: Option<Duration>,
    },

    /// Internal marker: the retry policy exhausted its attempts against
    /// repeated 429 responses. Mapped to [`SearchError::RateLimited`] at the
    /// governor boundary.
    #[error("Maximum retry attempts exceeded after {attempts} attempts")]
    MaxRetriesExceeded {
        /// Number of attempts that were made.
        attempts: u32,
    },

    /// User-visible rate limit condition: all retries were exhausted.
    #[error("Rate limited: {message}")]
    RateLimited {
        /// User-facing message.
        message: String,
    },

    /// The network call exceeded its bound. Never retried.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network/connection error. Never retried.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying cause.
        cause: Option<String>,
    },

    /// Any other HTTP error from the search API (4xx/5xx other than 429).
    /// Never retried; surfaced with the underlying message.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl SearchError {
    /// Returns true if this error is retryable.
    ///
    /// Only rate-limit responses are retryable: they are transient and
    /// self-correcting. Timeouts, server errors, and network failures
    /// propagate on first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SearchError::RateLimit { .. })
    }

    /// Returns the server-supplied retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            SearchError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns a stable label for this error's kind, used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Configuration { .. } => "configuration",
            SearchError::InvalidQuery { .. } => "invalid_query",
            SearchError::RateLimit { .. } => "rate_limit",
            SearchError::MaxRetriesExceeded { .. } => "max_retries_exceeded",
            SearchError::RateLimited { .. } => "rate_limited",
            SearchError::Timeout { .. } => "timeout",
            SearchError::Network { .. } => "network",
            SearchError::Api { .. } => "api",
            SearchError::Serialization { .. } => "serialization",
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        SearchError::Configuration {
            message: message.into(),
        }
    }

    /// Creates an invalid query error.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        SearchError::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates a rate-limit response error.
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        SearchError::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        SearchError::Api {
            status,
            message: message.into(),
        }
    }
}

/// API error response body from the search backend.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// The error details.
    pub error: ApiErrorDetail,
}

/// Detailed API error information.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// The error message.
    pub message: String,
    /// The error code.
    pub code: Option<String>,
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            SearchError::Network {
                message: err.to_string(),
                cause: None,
            }
        } else {
            SearchError::Network {
                message: err.to_string(),
                cause: err.source().map(|s| s.to_string()),
            }
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
