//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use wedplan_core::config::RateLimitConfig;
use wedplan_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::client::client_ip;
use crate::state::AppState;

/// In-memory token bucket rate limiter keyed by client address.
///
/// Buckets idle for longer than the configured TTL are evicted, at most
/// once per TTL interval.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → bucket state.
    inner: Arc<Mutex<Buckets>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
    /// Idle time after which a bucket is dropped.
    idle_ttl: Duration,
}

#[derive(Debug)]
struct Buckets {
    map: HashMap<String, TokenBucket>,
    last_sweep: Instant,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64, idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Buckets {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            max_tokens,
            refill_rate,
            idle_ttl,
        }
    }

    /// Creates a rate limiter from the `rate_limit` config section.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            config.burst,
            config.refill_per_second,
            Duration::from_secs(config.idle_ttl_seconds),
        )
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.inner.lock().await;
        let now = Instant::now();

        if now.duration_since(buckets.last_sweep) >= self.idle_ttl {
            let ttl = self.idle_ttl;
            let before = buckets.map.len();
            buckets
                .map
                .retain(|_, b| now.duration_since(b.last_refill) < ttl);
            buckets.last_sweep = now;
            debug!(evicted = before - buckets.map.len(), "Rate limit buckets swept");
        }

        let bucket = buckets.map.entry(key.to_string()).or_insert(TokenBucket {
            tokens: self.max_tokens as f64,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.max_tokens as f64);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Number of tracked clients.
    pub async fn tracked_clients(&self) -> usize {
        self.inner.lock().await.map.len()
    }
}

/// Rejects requests from clients that exhausted their bucket with 429.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(limiter) = &state.rate_limiter {
        let key = client_ip(request.headers(), request.extensions());
        if !limiter.check(&key).await {
            warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
            return Err(AppError::rate_limited("Too many requests, slow down").into());
        }
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_then_refill() {
        let limiter = RateLimiter::new(2, 1.0, Duration::from_secs(600));
        assert!(limiter.check("a").await);
        assert!(limiter.check("a").await);
        assert!(!limiter.check("a").await);
        assert!(limiter.check("b").await);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(limiter.check("a").await);
        assert!(!limiter.check("a").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_buckets_evicted() {
        let limiter = RateLimiter::new(5, 1.0, Duration::from_secs(10));
        limiter.check("a").await;
        limiter.check("b").await;
        assert_eq!(limiter.tracked_clients().await, 2);

        tokio::time::advance(Duration::from_secs(11)).await;
        limiter.check("c").await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
