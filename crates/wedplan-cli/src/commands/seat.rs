//! Seat assignment CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use wedplan_core::config::AppConfig;
use wedplan_core::error::AppError;
use wedplan_service::SeatingChart;

use super::guest::parse_guest_id;
use super::table::parse_table_id;

/// Arguments for seat commands
#[derive(Debug, Args)]
pub struct SeatArgs {
    /// Seat subcommand
    #[command(subcommand)]
    pub command: SeatCommand,
}

/// Seat subcommands
#[derive(Debug, Subcommand)]
pub enum SeatCommand {
    /// Assign a guest to a table, optionally at a specific seat
    Assign {
        /// Guest ID
        guest: String,
        /// Table ID
        table: String,
        /// Seat index; the first free seat is used when omitted
        #[arg(short, long)]
        seat: Option<i32>,
    },
    /// Clear a guest's table and seat
    Unassign {
        /// Guest ID
        guest: String,
    },
    /// Show the first free seat at a table
    Free {
        /// Table ID
        table: String,
    },
    /// Print the seating chart
    Chart,
}

/// One line of the seating chart
#[derive(Debug, Serialize, Tabled)]
struct ChartRow {
    /// Table name
    table: String,
    /// Seat index, blank for guests without a seat
    seat: String,
    /// Guest name, blank for an empty seat
    guest: String,
    /// Dietary notes
    dietary: String,
}

fn chart_rows(chart: &SeatingChart) -> Vec<ChartRow> {
    let mut rows = Vec::new();
    for tc in &chart.tables {
        for slot in &tc.seats {
            rows.push(ChartRow {
                table: tc.table.name.clone(),
                seat: slot.seat_index.to_string(),
                guest: slot.guest.as_ref().map(|g| g.name.clone()).unwrap_or_default(),
                dietary: slot
                    .guest
                    .as_ref()
                    .and_then(|g| g.dietary_notes.clone())
                    .unwrap_or_default(),
            });
        }
        for g in &tc.unplaced {
            rows.push(ChartRow {
                table: tc.table.name.clone(),
                seat: String::new(),
                guest: g.name.clone(),
                dietary: g.dietary_notes.clone().unwrap_or_default(),
            });
        }
    }
    rows
}

/// Execute seat commands
pub async fn execute(
    args: &SeatArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;
    let seating = &services.seating;

    match &args.command {
        SeatCommand::Assign { guest, table, seat } => {
            let guest_id = parse_guest_id(guest)?;
            let table_id = parse_table_id(table)?;
            let guest = match seat {
                Some(index) => {
                    seating
                        .assign_to_seat(&services.ctx, guest_id, table_id, *index)
                        .await?
                }
                None => {
                    seating
                        .assign_to_table(&services.ctx, guest_id, table_id)
                        .await?
                }
            };
            let seat = guest
                .seat_index
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            output::print_success(&format!("{} seated at seat {seat}", guest.name));
        }
        SeatCommand::Unassign { guest } => {
            let guest = seating
                .unassign(&services.ctx, parse_guest_id(guest)?)
                .await?;
            output::print_success(&format!("{} no longer has a seat", guest.name));
        }
        SeatCommand::Free { table } => {
            let table_id = parse_table_id(table)?;
            match services.tables.first_free_seat(table_id).await? {
                Some(index) => output::print_success(&format!("First free seat: {index}")),
                None => output::print_warning("Table is full"),
            }
        }
        SeatCommand::Chart => {
            let chart = seating.chart().await?;
            match format {
                OutputFormat::Json => output::print_json(&chart),
                OutputFormat::Table => {
                    output::print_list(&chart_rows(&chart), format);
                    if !chart.unassigned.is_empty() {
                        println!();
                        println!("Waiting for a seat:");
                        for g in &chart.unassigned {
                            println!("  {} ({})", g.name, g.rsvp_status);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
