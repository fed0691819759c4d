//! Seat ledger backend and store retry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which seat ledger implementation backs the seating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Guests and tables live in PostgreSQL.
    #[default]
    Postgres,
    /// Process-local ledger (single node, lost on restart).
    Memory,
}

/// Seating section of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatingConfig {
    /// Ledger backend.
    #[serde(default)]
    pub ledger: LedgerBackend,
    /// Retry policy for ledger calls.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Bounded retry with exponential backoff and an overall timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds.
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    /// Upper bound for a single backoff delay, in milliseconds.
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    /// Ceiling for the whole call including all retries, in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

impl RetryConfig {
    /// Backoff before attempt `attempt + 1` (attempt is 1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        let millis = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(millis)
    }

    /// Overall timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            timeout_ms: default_timeout(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    2_000
}

fn default_timeout() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let retry = RetryConfig {
            max_attempts: 6,
            initial_backoff_ms: 100,
            max_backoff_ms: 500,
            timeout_ms: 5_000,
        };
        assert_eq!(retry.backoff_for(1), Duration::from_millis(100));
        assert_eq!(retry.backoff_for(2), Duration::from_millis(200));
        assert_eq!(retry.backoff_for(3), Duration::from_millis(400));
        assert_eq!(retry.backoff_for(4), Duration::from_millis(500));
    }
}
