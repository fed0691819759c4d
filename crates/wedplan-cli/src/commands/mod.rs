//! CLI command definitions and dispatch.

pub mod audit;
pub mod guest;
pub mod migrate;
pub mod seat;
pub mod table;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use wedplan_core::config::{AppConfig, LedgerBackend};
use wedplan_core::error::AppError;
use wedplan_database::DatabasePool;
use wedplan_database::repositories::AuditLogRepository;
use wedplan_seating::{PostgresSeatLedger, SeatAllocator};
use wedplan_service::{GuestService, RequestContext, SeatingAudit, SeatingService, TableService};

use crate::output::OutputFormat;

/// Wedplan: guest list, reception tables, and seating
#[derive(Debug, Parser)]
#[command(name = "wedplan", version, about, long_about = None)]
pub struct Cli {
    /// Configuration directory
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment overlay
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Reception table management
    Table(table::TableArgs),
    /// Guest list management
    Guest(guest::GuestArgs),
    /// Seat assignment
    Seat(seat::SeatArgs),
    /// Audit log
    Audit(audit::AuditArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Table(args) => table::execute(args, &config, self.format).await,
            Commands::Guest(args) => guest::execute(args, &config, self.format).await,
            Commands::Seat(args) => seat::execute(args, &config, self.format).await,
            Commands::Audit(args) => audit::execute(args, &config, self.format).await,
        }
    }
}

/// Services wired over the PostgreSQL ledger.
pub struct Services {
    /// Table management.
    pub tables: TableService,
    /// Guest management.
    pub guests: GuestService,
    /// Seat assignment.
    pub seating: SeatingService,
    /// Context stamped on audit entries written by the CLI.
    pub ctx: RequestContext,
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: connect and wire the services. The in-memory ledger does not
/// outlive a process, so the CLI always talks to PostgreSQL.
pub async fn connect_services(config: &AppConfig) -> Result<Services, AppError> {
    if config.seating.ledger == LedgerBackend::Memory {
        return Err(AppError::configuration(
            "The CLI needs seating.ledger = \"postgres\"; the in-memory ledger lives inside the server process",
        ));
    }

    let pool = create_db_pool(config).await?.into_pool();
    let ledger = Arc::new(PostgresSeatLedger::new(
        pool.clone(),
        config.seating.retry.clone(),
    ));
    let allocator = Arc::new(SeatAllocator::new(ledger.clone()));
    let audit = Arc::new(SeatingAudit::new(Arc::new(AuditLogRepository::new(pool))));

    Ok(Services {
        tables: TableService::new(Arc::clone(&allocator), Arc::clone(&audit)),
        guests: GuestService::new(ledger, Arc::clone(&audit)),
        seating: SeatingService::new(allocator, audit),
        ctx: RequestContext::system("cli"),
    })
}
