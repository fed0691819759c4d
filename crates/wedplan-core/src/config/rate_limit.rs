//! Request rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Token bucket settings applied per client address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bucket size (maximum burst of requests).
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Tokens added back per second.
    #[serde(default = "default_refill")]
    pub refill_per_second: f64,
    /// Buckets idle for longer than this are evicted.
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            burst: default_burst(),
            refill_per_second: default_refill(),
            idle_ttl_seconds: default_idle_ttl(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_burst() -> u32 {
    60
}

fn default_refill() -> f64 {
    10.0
}

fn default_idle_ttl() -> u64 {
    600
}
