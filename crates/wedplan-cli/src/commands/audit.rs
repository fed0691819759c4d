//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use wedplan_core::config::AppConfig;
use wedplan_core::error::AppError;
use wedplan_database::repositories::AuditLogRepository;

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Show the most recent entries
    Recent {
        /// Number of entries
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    /// When
    time: String,
    /// Action name
    action: String,
    /// Target type
    target: String,
    /// Target ID
    target_id: String,
    /// Caller address
    source: String,
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::create_db_pool(config).await?;
    let repo = AuditLogRepository::new(db.pool().clone());

    match &args.command {
        AuditCommand::Recent { limit } => {
            if *limit <= 0 {
                return Err(AppError::validation("Limit must be positive"));
            }
            let rows: Vec<AuditRow> = repo
                .find_recent(*limit)
                .await?
                .into_iter()
                .map(|e| AuditRow {
                    time: e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    action: e.action,
                    target: e.target_type,
                    target_id: e.target_id.map(|id| id.to_string()).unwrap_or_default(),
                    source: e.ip_address.unwrap_or_default(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
