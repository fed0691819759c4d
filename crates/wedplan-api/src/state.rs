//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use wedplan_core::config::AppConfig;
use wedplan_seating::{SeatAllocator, SeatLedger};
use wedplan_service::{GuestService, SeatingAudit, SeatingService, TableService};

use crate::middleware::rate_limit::RateLimiter;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Name of the active seat ledger backend.
    pub ledger_backend: &'static str,
    /// When the process started serving.
    pub started_at: Instant,
    /// Guest management.
    pub guest_service: Arc<GuestService>,
    /// Table management.
    pub table_service: Arc<TableService>,
    /// Seat assignment.
    pub seating_service: Arc<SeatingService>,
    /// Per-client rate limiter, if enabled.
    pub rate_limiter: Option<RateLimiter>,
}

impl AppState {
    /// Wires services over a seat ledger.
    pub fn new(
        config: AppConfig,
        ledger: Arc<dyn SeatLedger>,
        ledger_backend: &'static str,
        audit: SeatingAudit,
    ) -> Self {
        let audit = Arc::new(audit);
        let allocator = Arc::new(SeatAllocator::new(Arc::clone(&ledger)));

        let guest_service = Arc::new(GuestService::new(ledger, Arc::clone(&audit)));
        let table_service = Arc::new(TableService::new(
            Arc::clone(&allocator),
            Arc::clone(&audit),
        ));
        let seating_service = Arc::new(SeatingService::new(allocator, audit));

        let rate_limiter = config
            .rate_limit
            .enabled
            .then(|| RateLimiter::from_config(&config.rate_limit));

        Self {
            config: Arc::new(config),
            ledger_backend,
            started_at: Instant::now(),
            guest_service,
            table_service,
            seating_service,
            rate_limiter,
        }
    }
}
