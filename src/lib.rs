//! LuvToSearch API Client Library
//!
//! A Rust client for the LuvToSearch API that governs the whole request
//! path: responses are cached with a TTL, outbound calls are throttled
//! through a sliding-window admission controller, and rate-limit responses
//! are retried with backoff before surfacing to the caller.
//!
//! # Features
//!
//! - **Response Cache**: TTL-based caching keyed by the exact query string
//! - **Admission Control**: Sliding-window throttle on outbound requests
//! - **Retry**: Rate-limit responses retried with server hints or
//!   exponential backoff
//! - **Interest Tokens**: Outcome delivery gated on the caller still caring
//! - **Observability**: Tracing, metrics, structured logging
//! - **Async/Await**: Built on Tokio for high-performance async I/O
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use luvsearch_client::SearchClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SearchClient::builder()
//!         .api_key("lvs_your_api_key")
//!         .build()?;
//!
//!     let response = client.search("brutalist ui").await?;
//!     for result in &response.organic_results {
//!         println!("{} — {}", result.title, result.link);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Interest Tokens
//!
//! When the caller may stop caring about a search mid-flight (a user typed
//! a new query, a view was torn down), pass an [`InterestToken`] and release
//! it. The request still completes and populates the cache, but the outcome
//! is not delivered:
//!
//! ```rust,no_run
//! use luvsearch_client::{InterestToken, SearchClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SearchClient::from_env()?;
//!     let interest = InterestToken::new();
//!
//!     let handle = {
//!         let interest = interest.clone();
//!         async move { client.search_with_interest("rust", &interest).await }
//!     };
//!
//!     interest.release();
//!     assert!(handle.await.is_none());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod governor;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use auth::{ApiKeyAuth, AuthProvider};
pub use cache::ResponseCache;
pub use client::{SearchClient, SearchClientBuilder};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use errors::{SearchError, SearchResult};
pub use governor::{InterestToken, RequestGovernor};
pub use observability::{
    init_tracing, LogConfig, LogLevel, Logger, MetricsCollector, Observability,
    ObservabilityConfig, SearchMetrics,
};
pub use resilience::{AdmissionConfig, AdmissionController, RetryConfig, RetryPolicy};
pub use services::SearchService;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};
pub use types::{AiOverview, InlineVideo, OrganicResult, SearchResponse, TextBlock};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
