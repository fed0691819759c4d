//! Reception table CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use wedplan_core::config::AppConfig;
use wedplan_core::error::AppError;
use wedplan_core::types::TableId;
use wedplan_entity::table::{CreateTable, UpdateTable};
use wedplan_service::TableSummary;

/// Arguments for table commands
#[derive(Debug, Args)]
pub struct TableArgs {
    /// Table subcommand
    #[command(subcommand)]
    pub command: TableCommand,
}

/// Table subcommands
#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// List all tables with occupancy
    List,
    /// Show one table
    Show {
        /// Table ID
        id: String,
    },
    /// Create a table
    Create {
        /// Table name
        #[arg(short, long)]
        name: String,
        /// Number of seats
        #[arg(short, long)]
        seats: i32,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Mark as the head table
        #[arg(long)]
        head: bool,
    },
    /// Rename, resize or annotate a table
    Update {
        /// Table ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New seat count
        #[arg(short, long)]
        seats: Option<i32>,
        /// New notes; pass "" to clear them
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a table, unassigning its guests
    Delete {
        /// Table ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Table display row
#[derive(Debug, Serialize, Tabled)]
struct TableRow {
    /// Table ID
    id: String,
    /// Name
    name: String,
    /// Seats
    seats: i32,
    /// Assigned guests
    assigned: i32,
    /// Free seats
    free: i32,
    /// Head table marker
    head: String,
}

impl From<&TableSummary> for TableRow {
    fn from(s: &TableSummary) -> Self {
        Self {
            id: s.table.id.to_string(),
            name: s.table.name.clone(),
            seats: s.occupancy.seat_count,
            assigned: s.occupancy.assigned_count,
            free: s.occupancy.free_seats,
            head: if s.table.is_head { "yes" } else { "" }.to_string(),
        }
    }
}

/// Parse a table ID argument
pub(crate) fn parse_table_id(raw: &str) -> Result<TableId, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid table ID: '{raw}'")))
}

/// Execute table commands
pub async fn execute(
    args: &TableArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;
    let tables = &services.tables;

    match &args.command {
        TableCommand::List => {
            let summaries = tables.list_tables().await?;
            let rows: Vec<TableRow> = summaries.iter().map(TableRow::from).collect();
            output::print_list(&rows, format);
        }
        TableCommand::Show { id } => {
            let summary = tables.get_table(parse_table_id(id)?).await?;
            match format {
                OutputFormat::Json => output::print_json(&summary),
                OutputFormat::Table => {
                    println!("Table {}", summary.table.name);
                    output::print_kv("ID", &summary.table.id.to_string());
                    output::print_kv("Seats", &summary.occupancy.seat_count.to_string());
                    output::print_kv("Assigned", &summary.occupancy.assigned_count.to_string());
                    output::print_kv("Free", &summary.occupancy.free_seats.to_string());
                    output::print_kv("Head table", &summary.table.is_head.to_string());
                    if let Some(notes) = &summary.table.notes {
                        output::print_kv("Notes", notes);
                    }
                }
            }
        }
        TableCommand::Create {
            name,
            seats,
            notes,
            head,
        } => {
            let table = tables
                .create_table(
                    &services.ctx,
                    CreateTable {
                        name: name.clone(),
                        seat_count: *seats,
                        notes: notes.clone(),
                        is_head: *head,
                    },
                )
                .await?;
            output::print_success(&format!(
                "Table '{}' created with {} seats ({})",
                table.name, table.seat_count, table.id
            ));
        }
        TableCommand::Update {
            id,
            name,
            seats,
            notes,
        } => {
            let table = tables
                .update_table(
                    &services.ctx,
                    parse_table_id(id)?,
                    UpdateTable {
                        name: name.clone(),
                        seat_count: *seats,
                        notes: notes.clone(),
                        ..Default::default()
                    },
                )
                .await?;
            output::print_success(&format!(
                "Table '{}' now has {} seats",
                table.name, table.seat_count
            ));
        }
        TableCommand::Delete { id, force } => {
            let table_id = parse_table_id(id)?;
            let summary = tables.get_table(table_id).await?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete table '{}' and unassign {} guest(s)?",
                        summary.table.name, summary.occupancy.assigned_count
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let unassigned = tables.delete_table(&services.ctx, table_id).await?;
            output::print_success(&format!(
                "Table '{}' deleted, {unassigned} guest(s) unassigned",
                summary.table.name
            ));
        }
    }

    Ok(())
}
