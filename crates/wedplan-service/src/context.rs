//! Request context carrying the caller's origin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Extracted by the HTTP layer (or built by the CLI) and passed into
/// service methods so audit records know where a change came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(ip_address: impl Into<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Context for operator actions issued outside HTTP, e.g. the CLI.
    pub fn system(source: &str) -> Self {
        Self::new(format!("local:{source}"), None)
    }
}
