//! Wedplan Server: guest list, reception tables, and seat assignment.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use wedplan_api::AppState;
use wedplan_core::config::{AppConfig, LedgerBackend};
use wedplan_core::error::AppError;
use wedplan_database::DatabasePool;
use wedplan_database::repositories::AuditLogRepository;
use wedplan_seating::{SeatLedger, SeatLedgerDispatch};
use wedplan_service::SeatingAudit;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("WEDPLAN_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("WEDPLAN_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Wedplan");

    // ── Step 1: Database connection + migrations ─────────────────
    let db = match config.seating.ledger {
        LedgerBackend::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            db.health_check().await?;
            wedplan_database::migration::run_migrations(db.pool()).await?;
            Some(db)
        }
        LedgerBackend::Memory => {
            tracing::warn!("In-memory seat ledger selected; data is lost on restart");
            None
        }
    };

    // ── Step 2: Seat ledger + audit ──────────────────────────────
    let ledger =
        SeatLedgerDispatch::from_config(&config.seating, db.as_ref().map(|d| d.pool().clone()))?;
    let backend = ledger.backend_name();
    let ledger: Arc<dyn SeatLedger> = Arc::new(ledger);

    let audit = match &db {
        Some(db) => SeatingAudit::new(Arc::new(AuditLogRepository::new(db.pool().clone()))),
        None => SeatingAudit::log_only(),
    };

    // ── Step 3: HTTP server ──────────────────────────────────────
    let state = AppState::new(config, ledger, backend, audit);
    wedplan_api::run_server(state).await?;

    if let Some(db) = db {
        db.close().await;
    }
    tracing::info!("Wedplan server shut down gracefully");
    Ok(())
}
