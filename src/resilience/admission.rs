//! Sliding-window admission control.
//!
//! Bounds the number of outbound search requests in a trailing time window,
//! delaying callers rather than rejecting them. The window slides continuously
//! with the current instant, so there is no burst-at-boundary problem the way
//! a fixed-bucket reset would have.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Admission control configuration.
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    /// Maximum requests admitted within the trailing window.
    pub max_requests: u32,
    /// Length of the trailing window.
    pub window: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_requests: 15,
            window: Duration::from_secs(60),
        }
    }
}

impl AdmissionConfig {
    /// Creates a new admission configuration.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

/// Sliding-window admission controller.
///
/// Process-wide singleton: every governor invocation contends on the same
/// window regardless of originating caller or query. The timestamp sequence
/// is never exposed; the only surface is [`acquire`](Self::acquire).
pub struct AdmissionController {
    config: AdmissionConfig,
    // Admission timestamps, oldest first. Pruned lazily before each check.
    window: Mutex<VecDeque<Instant>>,
}

impl AdmissionController {
    /// Creates a new admission controller.
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            config,
            window: Mutex::new(VecDeque::new()),
        }
    }

    /// Creates a controller with the default 15-per-60s policy.
    pub fn with_defaults() -> Self {
        Self::new(AdmissionConfig::default())
    }

    /// Acquires an admission slot, suspending the caller while the window
    /// is full. Never fails.
    ///
    /// On each pass: timestamps older than `now - window` are dropped; if
    /// fewer than `max_requests` remain, `now` is recorded and the caller
    /// proceeds. Otherwise the caller sleeps until the oldest remaining
    /// timestamp leaves the window and re-checks. The prune-then-record
    /// sequence runs under the mutex, which is never held across the sleep.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let now = Instant::now();
                let mut window = match self.window.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };

                while let Some(oldest) = window.front() {
                    if now.duration_since(*oldest) >= self.config.window {
                        window.pop_front();
                    } else {
                        break;
                    }
                }

                if (window.len() as u32) < self.config.max_requests {
                    window.push_back(now);
                    return;
                }

                match window.front() {
                    Some(oldest) => self.config.window - now.duration_since(*oldest),
                    None => return,
                }
            };

            tracing::debug!(wait_ms = wait.as_millis(), "Admission window full, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    /// Returns the number of admissions currently inside the window.
    pub fn in_window(&self) -> usize {
        let now = Instant::now();
        match self.window.lock() {
            Ok(window) => window
                .iter()
                .filter(|ts| now.duration_since(**ts) < self.config.window)
                .count(),
            Err(_) => 0,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }
}

impl std::fmt::Debug for AdmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionController")
            .field("config", &self.config)
            .field("in_window", &self.in_window())
            .finish()
    }
}
