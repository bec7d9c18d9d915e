//! Observability module for the LuvToSearch client.
//!
//! Provides structured logging and metrics for the search request path:
//! cache effectiveness, admission delays, and backend request outcomes.

mod logging;
mod metrics;

pub use logging::{init_tracing, ConsoleLogger, LogConfig, LogLevel, Logger, NoopLogger};
pub use metrics::{DefaultMetricsCollector, MetricsCollector, SearchMetrics};

use std::sync::Arc;
use std::time::Duration;

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    pub logging: LogConfig,
    /// Enable metrics collection.
    pub enable_metrics: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging: LogConfig::default(),
            enable_metrics: true,
        }
    }
}

/// Observability facade the governor reports through.
pub struct Observability {
    logger: Arc<dyn Logger>,
    metrics: Arc<dyn MetricsCollector>,
    config: ObservabilityConfig,
}

impl Observability {
    /// Creates a new observability facade.
    pub fn new(config: ObservabilityConfig) -> Self {
        Self {
            logger: Arc::new(ConsoleLogger::new(config.logging.clone())),
            metrics: Arc::new(DefaultMetricsCollector::new()),
            config,
        }
    }

    /// Creates with custom logger and metrics collector.
    pub fn with_components(
        logger: Arc<dyn Logger>,
        metrics: Arc<dyn MetricsCollector>,
        config: ObservabilityConfig,
    ) -> Self {
        Self {
            logger,
            metrics,
            config,
        }
    }

    /// Returns the logger.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Returns the metrics collector.
    pub fn metrics(&self) -> &Arc<dyn MetricsCollector> {
        &self.metrics
    }

    /// Records a cache hit.
    pub fn record_cache_hit(&self) {
        if self.config.enable_metrics {
            self.metrics.record_cache_hit();
        }
    }

    /// Records a cache miss.
    pub fn record_cache_miss(&self) {
        if self.config.enable_metrics {
            self.metrics.record_cache_miss();
        }
    }

    /// Records time spent waiting for admission.
    pub fn record_admission_wait(&self, duration: Duration) {
        if self.config.enable_metrics {
            self.metrics.record_admission_wait(duration);
        }
    }

    /// Records a successful backend request.
    pub fn record_success(&self, duration: Duration) {
        if self.config.enable_metrics {
            self.metrics.record_request(true, duration);
        }
    }

    /// Records a failed backend request.
    pub fn record_failure(&self, duration: Duration, error_kind: &str) {
        if self.config.enable_metrics {
            self.metrics.record_request(false, duration);
            self.metrics.record_error(error_kind);
        }
    }
}

impl Default for Observability {
    fn default() -> Self {
        Self::new(ObservabilityConfig::default())
    }
}

impl std::fmt::Debug for Observability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observability")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_disabled() {
        let observability = Observability::new(ObservabilityConfig {
            logging: LogConfig::default(),
            enable_metrics: false,
        });

        observability.record_cache_hit();
        observability.record_success(Duration::from_millis(10));
        observability.record_failure(Duration::from_millis(10), "timeout");

        let metrics = observability.metrics().get_metrics();
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.cache_hits, 0);
    }

    #[test]
    fn test_facade_records_through_collector() {
        let observability = Observability::default();

        observability.record_cache_miss();
        observability.record_admission_wait(Duration::from_secs(1));
        observability.record_failure(Duration::from_millis(5), "rate_limited");

        let metrics = observability.metrics().get_metrics();
        assert_eq!(metrics.cache_misses, 1);
        assert_eq!(metrics.admission_waits, 1);
        assert_eq!(metrics.errors.get("rate_limited"), Some(&1));
    }
}
