//! Request governor: the orchestrated search request path.
//!
//! Turns a raw query string into a rate-limited, retried, cached call to the
//! search backend: consult cache, acquire an admission slot, execute with
//! retry, populate the cache, deliver. Tolerates the caller losing interest
//! mid-flight via [`InterestToken`].

mod interest;

pub use interest::InterestToken;

use std::sync::Arc;
use tokio::time::Instant;
use tracing::instrument;

use crate::cache::ResponseCache;
use crate::errors::{SearchError, SearchResult};
use crate::observability::Observability;
use crate::resilience::{AdmissionController, RetryPolicy};
use crate::services::SearchService;
use crate::types::SearchResponse;

/// Orchestrates cache, admission control, and retry for search requests.
///
/// The cache and the admission controller are process-wide singletons:
/// every invocation, regardless of originating caller or query, contends on
/// the same admission window and the same cache map. Concurrent requests for
/// the same key are not deduplicated; both miss and both consume a slot.
pub struct RequestGovernor {
    service: SearchService,
    cache: Arc<ResponseCache>,
    admission: Arc<AdmissionController>,
    retry: RetryPolicy,
    observability: Arc<Observability>,
}

impl RequestGovernor {
    /// Creates a new request governor.
    pub fn new(
        service: SearchService,
        cache: Arc<ResponseCache>,
        admission: Arc<AdmissionController>,
        retry: RetryPolicy,
        observability: Arc<Observability>,
    ) -> Self {
        Self {
            service,
            cache,
            admission,
            retry,
            observability,
        }
    }

    /// Resolves a query into a search response.
    ///
    /// Blank queries fail fast with [`SearchError::InvalidQuery`] before any
    /// I/O. A cache hit returns immediately with no admission or network
    /// cost. On a miss the call may suspend twice: waiting for an admission
    /// slot, and inside the retry policy's backoff. The cache is only
    /// written after a fully successful fetch; a failed attempt never
    /// poisons it.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> SearchResult<Arc<SearchResponse>> {
        if query.trim().is_empty() {
            return Err(SearchError::invalid_query("query must not be blank"));
        }

        if let Some(payload) = self.cache.get(query) {
            tracing::debug!(query, "cache hit");
            self.observability.record_cache_hit();
            return Ok(payload);
        }
        self.observability.record_cache_miss();

        let admission_start = Instant::now();
        self.admission.acquire().await;
        self.observability
            .record_admission_wait(admission_start.elapsed());

        let fetch_start = Instant::now();
        match self.retry.execute(|| self.service.fetch(query)).await {
            Ok(payload) => {
                self.observability.record_success(fetch_start.elapsed());
                let payload = Arc::new(payload);
                self.cache.put(query, Arc::clone(&payload));
                Ok(payload)
            }
            Err(err) => {
                let err = Self::classify(err);
                self.observability
                    .record_failure(fetch_start.elapsed(), err.kind());
                tracing::warn!(query, error = %err, "search request failed");
                Err(err)
            }
        }
    }

    /// Resolves a query, delivering the outcome only while the caller is
    /// still interested.
    ///
    /// The resolution runs to completion either way: admission slots are
    /// consumed, retries finish, and a successful payload still lands in the
    /// cache for the next caller. Only the *delivery* is gated; a released
    /// token yields `None` and the outcome is dropped.
    pub async fn resolve_with_interest(
        &self,
        query: &str,
        interest: &InterestToken,
    ) -> Option<SearchResult<Arc<SearchResponse>>> {
        let outcome = self.resolve(query).await;

        if interest.is_live() {
            Some(outcome)
        } else {
            tracing::debug!(query, "caller lost interest, discarding outcome");
            None
        }
    }

    /// Maps internal retry exhaustion to the user-visible rate-limit
    /// condition. Every other error passes through unchanged.
    fn classify(err: SearchError) -> SearchError {
        match err {
            SearchError::MaxRetriesExceeded { .. } => SearchError::RateLimited {
                message: "too many requests, try again shortly".to_string(),
            },
            other => other,
        }
    }

    /// Returns the response cache.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Returns the admission controller.
    pub fn admission(&self) -> &Arc<AdmissionController> {
        &self.admission
    }
}

impl std::fmt::Debug for RequestGovernor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestGovernor")
            .field("service", &self.service)
            .field("cache", &self.cache)
            .field("admission", &self.admission)
            .finish()
    }
}
