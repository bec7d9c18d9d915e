//! TTL response cache for the LuvToSearch client.
//!
//! Maps a verbatim query string to a previously fetched search response,
//! valid for a fixed time window. Expired entries are treated as absent but
//! never removed; the map grows without bound for distinct keys. That is a
//! documented limitation, not a correctness bug.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::types::SearchResponse;

/// Default time-to-live for cached responses (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    payload: Arc<SearchResponse>,
    stored_at: Instant,
}

/// TTL cache for search responses.
///
/// Keys are the raw query string: case-sensitive, untrimmed. Two queries
/// differing only in whitespace or case are distinct entries.
///
/// The cache is a process-wide singleton shared across governor invocations;
/// the lock is never held across an await point.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates a cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a cache with the default 5-minute TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Returns the cached payload for `key` iff it is younger than the TTL.
    ///
    /// Expired entries are left in place and treated as absent; a later
    /// `put` for the same key overwrites them.
    pub fn get(&self, key: &str) -> Option<Arc<SearchResponse>> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(Arc::clone(&entry.payload))
        } else {
            None
        }
    }

    /// Stores `payload` under `key`, unconditionally overwriting any previous
    /// entry and stamping the current time.
    pub fn put(&self, key: impl Into<String>, payload: Arc<SearchResponse>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.into(),
                CacheEntry {
                    payload,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the number of entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> Arc<SearchResponse> {
        Arc::new(SearchResponse {
            organic_results: Vec::new(),
            inline_videos: Vec::new(),
            ai_overview: None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_before_ttl_miss_after() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        cache.put("brutalist ui", payload());

        assert!(cache.get("brutalist ui").is_some());

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(cache.get("brutalist ui").is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("brutalist ui").is_none());

        // Expired entries are not removed, merely treated as absent.
        assert_eq!(cache.len(), 1);
        assert!(cache.get("brutalist ui").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_overwrites_and_restamps() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.put("q", payload());

        tokio::time::advance(Duration::from_secs(8)).await;
        cache.put("q", payload());

        // The fresh stamp keeps the entry alive past the first one's expiry.
        tokio::time::advance(Duration::from_secs(8)).await;
        assert!(cache.get("q").is_some());
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache = ResponseCache::with_default_ttl();
        assert!(cache.get("nothing here").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_are_byte_exact() {
        let cache = ResponseCache::with_default_ttl();
        cache.put("Brutalist UI", payload());

        // No trimming, no case folding.
        assert!(cache.get("brutalist ui").is_none());
        assert!(cache.get(" Brutalist UI").is_none());
        assert!(cache.get("Brutalist UI").is_some());
    }

    #[test]
    fn test_shared_payload_identity() {
        let cache = ResponseCache::with_default_ttl();
        let p = payload();
        cache.put("q", Arc::clone(&p));

        let hit = cache.get("q").unwrap();
        assert!(Arc::ptr_eq(&p, &hit));
    }
}
