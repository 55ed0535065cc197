//! Client-side rate limiting
//!
//! Uses the governor crate for token bucket rate limiting. The limiter only
//! delays requests; it never retries them.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for rate limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Requests allowed per `period`
    pub max_requests: u32,
    /// Window the request budget applies to
    pub period: Duration,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    /// The REST API's unauthenticated budget: 150 requests per hour
    fn default() -> Self {
        Self::per_hour(150)
    }
}

impl RateLimiterConfig {
    /// Allow `requests` per second, bursting up to the same amount
    pub fn per_second(requests: u32) -> Self {
        Self {
            max_requests: requests,
            period: Duration::from_secs(1),
            burst_size: requests,
        }
    }

    /// Allow `requests` per hour, bursting up to the same amount
    pub fn per_hour(requests: u32) -> Self {
        Self {
            max_requests: requests,
            period: Duration::from_secs(3600),
            burst_size: requests,
        }
    }

    /// Override the burst size
    #[must_use]
    pub fn with_burst(mut self, burst_size: u32) -> Self {
        self.burst_size = burst_size;
        self
    }

    /// Interval at which one token is replenished
    pub fn replenish_interval(&self) -> Duration {
        let requests = self.max_requests.max(1);
        (self.period / requests).max(Duration::from_nanos(1))
    }

    fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(self.replenish_interval())
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst)
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            config: *config,
            limiter: Arc::new(Governor::direct(config.quota())),
        }
    }

    /// The configuration this limiter was built from
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.max_requests, 150);
        assert_eq!(config.period, Duration::from_secs(3600));
        assert_eq!(config.burst_size, 150);
        assert_eq!(config.replenish_interval(), Duration::from_secs(24));
    }

    #[test]
    fn test_rate_limiter_config_per_second() {
        let config = RateLimiterConfig::per_second(50).with_burst(25);
        assert_eq!(config.max_requests, 50);
        assert_eq!(config.burst_size, 25);
        assert_eq!(config.replenish_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_rate_limiter_config_zero_requests() {
        let config = RateLimiterConfig::per_second(0);
        assert_eq!(config.replenish_interval(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_rate_limiter_allows_burst() {
        let limiter = RateLimiter::new(&RateLimiterConfig::per_second(10).with_burst(5));

        for _ in 0..5 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_rate_limiter_wait() {
        let limiter = RateLimiter::new(&RateLimiterConfig::per_second(100));

        // Within burst, so this returns immediately
        limiter.wait().await;
        assert_eq!(limiter.config().max_requests, 100);
    }
}
