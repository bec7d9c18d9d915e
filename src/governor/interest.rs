//! Caller interest tokens for result delivery.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A caller's interest in a pending search result.
///
/// The token governs result *delivery* only. Releasing it tells the governor
/// to discard the outcome of an in-flight `resolve`; it does not abort the
/// network call, the retry cycle, or the admission bookkeeping, which run to
/// completion regardless.
///
/// Cloned handles share the same flag: releasing any clone releases all.
#[derive(Clone, Debug)]
pub struct InterestToken {
    live: Arc<AtomicBool>,
}

impl InterestToken {
    /// Creates a live token.
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Marks the caller as no longer interested in pending results.
    pub fn release(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    /// Returns true while the caller still wants results delivered.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

impl Default for InterestToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_live() {
        let token = InterestToken::new();
        assert!(token.is_live());
    }

    #[test]
    fn test_release_is_shared_across_clones() {
        let token = InterestToken::new();
        let clone = token.clone();

        clone.release();

        assert!(!token.is_live());
        assert!(!clone.is_live());
    }
}
