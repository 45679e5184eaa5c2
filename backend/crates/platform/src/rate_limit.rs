//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions and implementations. Counting is
//! fixed-window: the first request in a window creates the counter, and
//! the counter resets when a request arrives after the window end. A
//! burst across a window boundary can therefore see up to twice the
//! configured maximum; the simplicity is intentional.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Seconds until the window resets, rounded up, at least 1
    ///
    /// Suitable for a Retry-After header on a denied request.
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let remaining_ms = self.reset_at_ms.saturating_sub(now_ms).max(0);
        ((remaining_ms + 999) / 1000).max(1) as u64
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    ///
    /// Must count the request even when it is denied; denied requests
    /// do not extend the window.
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// In-process fixed-window store
///
/// Counters live in a mutex-guarded map, so limits are per-process and
/// vanish on restart. Stale windows are dropped lazily whenever their
/// key is touched again.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, WindowEntry>>,
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    window_start_ms: i64,
    request_count: u32,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check against an explicit clock; `check_and_increment` uses wall time
    pub fn check_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            // A poisoned lock only means another thread panicked mid-insert;
            // the map is still usable for counting
            Err(poisoned) => poisoned.into_inner(),
        };

        let entry = windows
            .entry(key.to_string())
            .or_insert(WindowEntry {
                window_start_ms: now_ms,
                request_count: 0,
            });

        if now_ms - entry.window_start_ms >= config.window_ms() {
            entry.window_start_ms = now_ms;
            entry.request_count = 0;
        }

        entry.request_count += 1;

        let allowed = entry.request_count <= config.max_requests;
        RateLimitResult {
            allowed,
            remaining: config.max_requests.saturating_sub(entry.request_count),
            reset_at_ms: entry.window_start_ms + config.window_ms(),
        }
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_at(key, config, unix_now_ms()))
    }
}

fn unix_now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_max_requests() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(3, 60);

        for i in 0..3 {
            let result = store.check_at("ip:1.2.3.4", &config, 1_000);
            assert!(result.allowed, "request {} should pass", i + 1);
        }

        let result = store.check_at("ip:1.2.3.4", &config, 1_000);
        assert!(!result.allowed);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn test_window_reset() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_at("k", &config, 0).allowed);
        assert!(!store.check_at("k", &config, 59_999).allowed);
        // Window expired: counter starts over
        assert!(store.check_at("k", &config, 60_000).allowed);
    }

    #[test]
    fn test_denied_requests_do_not_extend_window() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_at("k", &config, 0).allowed);
        for now in [10_000, 30_000, 59_000] {
            let result = store.check_at("k", &config, now);
            assert!(!result.allowed);
            assert_eq!(result.reset_at_ms, 60_000);
        }
        assert!(store.check_at("k", &config, 60_001).allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::new();
        let config = RateLimitConfig::new(1, 60);

        assert!(store.check_at("a", &config, 0).allowed);
        assert!(!store.check_at("a", &config, 1).allowed);
        assert!(store.check_at("b", &config, 1).allowed);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let result = RateLimitResult {
            allowed: false,
            remaining: 0,
            reset_at_ms: 10_500,
        };
        assert_eq!(result.retry_after_secs(10_000), 1);
        assert_eq!(result.retry_after_secs(9_000), 2);
        // Window already past: still at least one second
        assert_eq!(result.retry_after_secs(11_000), 1);
    }
}
