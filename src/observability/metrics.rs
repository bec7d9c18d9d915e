//! Metrics collection for the search request path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Metrics collector interface.
pub trait MetricsCollector: Send + Sync {
    /// Records a completed backend request.
    fn record_request(&self, success: bool, duration: Duration);

    /// Records a cache hit.
    fn record_cache_hit(&self);

    /// Records a cache miss.
    fn record_cache_miss(&self);

    /// Records time spent waiting for an admission slot.
    fn record_admission_wait(&self, duration: Duration);

    /// Records an error by kind.
    fn record_error(&self, error_kind: &str);

    /// Gets current metrics.
    fn get_metrics(&self) -> SearchMetrics;

    /// Resets all metrics.
    fn reset(&self);
}

/// Search metrics snapshot.
#[derive(Debug, Clone, Default)]
pub struct SearchMetrics {
    /// Total backend requests (cache hits excluded).
    pub total_requests: u64,
    /// Successful backend requests.
    pub successful_requests: u64,
    /// Failed backend requests.
    pub failed_requests: u64,
    /// Total backend latency in milliseconds.
    pub total_latency_ms: u64,
    /// Cache hits.
    pub cache_hits: u64,
    /// Cache misses.
    pub cache_misses: u64,
    /// Number of admission waits that actually suspended a caller.
    pub admission_waits: u64,
    /// Total time spent waiting for admission, in milliseconds.
    pub admission_wait_ms: u64,
    /// Error counts by kind.
    pub errors: HashMap<String, u64>,
}

impl SearchMetrics {
    /// Calculates average backend latency in milliseconds.
    pub fn average_latency_ms(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / self.total_requests as f64
        }
    }

    /// Calculates backend success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            100.0
        } else {
            (self.successful_requests as f64 / self.total_requests as f64) * 100.0
        }
    }

    /// Calculates the cache hit rate as a percentage.
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            (self.cache_hits as f64 / lookups as f64) * 100.0
        }
    }
}

/// Default metrics collector implementation.
pub struct DefaultMetricsCollector {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    total_latency_ms: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    admission_waits: AtomicU64,
    admission_wait_ms: AtomicU64,
    errors: RwLock<HashMap<String, u64>>,
}

impl DefaultMetricsCollector {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            successful_requests: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            admission_waits: AtomicU64::new(0),
            admission_wait_ms: AtomicU64::new(0),
            errors: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for DefaultMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector for DefaultMetricsCollector {
    fn record_request(&self, success: bool, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_admission_wait(&self, duration: Duration) {
        if duration > Duration::ZERO {
            self.admission_waits.fetch_add(1, Ordering::Relaxed);
            self.admission_wait_ms
                .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        }
    }

    fn record_error(&self, error_kind: &str) {
        if let Ok(mut errors) = self.errors.write() {
            *errors.entry(error_kind.to_string()).or_insert(0) += 1;
        }
    }

    fn get_metrics(&self) -> SearchMetrics {
        SearchMetrics {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            total_latency_ms: self.total_latency_ms.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            admission_waits: self.admission_waits.load(Ordering::Relaxed),
            admission_wait_ms: self.admission_wait_ms.load(Ordering::Relaxed),
            errors: self.errors.read().map(|e| e.clone()).unwrap_or_default(),
        }
    }

    fn reset(&self) {
        self.total_requests.store(0, Ordering::Relaxed);
        self.successful_requests.store(0, Ordering::Relaxed);
        self.failed_requests.store(0, Ordering::Relaxed);
        self.total_latency_ms.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.admission_waits.store(0, Ordering::Relaxed);
        self.admission_wait_ms.store(0, Ordering::Relaxed);

        if let Ok(mut errors) = self.errors.write() {
            errors.clear();
        }
    }
}

impl std::fmt::Debug for DefaultMetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultMetricsCollector")
            .field(
                "total_requests",
                &self.total_requests.load(Ordering::Relaxed),
            )
            .field("cache_hits", &self.cache_hits.load(Ordering::Relaxed))
            .field("cache_misses", &self.cache_misses.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request() {
        let collector = DefaultMetricsCollector::new();

        collector.record_request(true, Duration::from_millis(100));
        collector.record_request(true, Duration::from_millis(200));
        collector.record_request(false, Duration::from_millis(50));

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.successful_requests, 2);
        assert_eq!(metrics.failed_requests, 1);
        assert_eq!(metrics.total_latency_ms, 350);
        assert!((metrics.average_latency_ms() - 116.666).abs() < 0.01);
    }

    #[test]
    fn test_cache_hit_rate() {
        let collector = DefaultMetricsCollector::new();

        collector.record_cache_hit();
        collector.record_cache_hit();
        collector.record_cache_hit();
        collector.record_cache_miss();

        let metrics = collector.get_metrics();
        assert_eq!(metrics.cache_hits, 3);
        assert_eq!(metrics.cache_misses, 1);
        assert!((metrics.cache_hit_rate() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_admission_wait_ignores_zero() {
        let collector = DefaultMetricsCollector::new();

        collector.record_admission_wait(Duration::ZERO);
        collector.record_admission_wait(Duration::from_secs(2));

        let metrics = collector.get_metrics();
        assert_eq!(metrics.admission_waits, 1);
        assert_eq!(metrics.admission_wait_ms, 2000);
    }

    #[test]
    fn test_record_errors_by_kind() {
        let collector = DefaultMetricsCollector::new();

        collector.record_error("rate_limited");
        collector.record_error("rate_limited");
        collector.record_error("timeout");

        let metrics = collector.get_metrics();
        assert_eq!(metrics.errors.get("rate_limited"), Some(&2));
        assert_eq!(metrics.errors.get("timeout"), Some(&1));
    }

    #[test]
    fn test_reset() {
        let collector = DefaultMetricsCollector::new();
        collector.record_request(true, Duration::from_millis(10));
        collector.record_cache_hit();
        collector.record_error("timeout");

        collector.reset();

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.cache_hits, 0);
        assert!(metrics.errors.is_empty());
        assert!((metrics.success_rate() - 100.0).abs() < f64::EPSILON);
    }
}
