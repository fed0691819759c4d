//! Guest list CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use wedplan_core::config::AppConfig;
use wedplan_core::error::AppError;
use wedplan_core::types::GuestId;
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};

/// Arguments for guest commands
#[derive(Debug, Args)]
pub struct GuestArgs {
    /// Guest subcommand
    #[command(subcommand)]
    pub command: GuestCommand,
}

/// Guest subcommands
#[derive(Debug, Subcommand)]
pub enum GuestCommand {
    /// List guests
    List {
        /// Filter by RSVP status
        #[arg(short, long)]
        rsvp: Option<String>,
        /// Only guests without a table
        #[arg(long)]
        unassigned: bool,
    },
    /// Add a guest
    Add {
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Contact email
        #[arg(short, long)]
        email: Option<String>,
        /// Initial RSVP status
        #[arg(short, long, default_value = "pending")]
        rsvp: String,
        /// Dietary requirements
        #[arg(short, long)]
        dietary: Option<String>,
    },
    /// Record an RSVP answer
    Rsvp {
        /// Guest ID
        id: String,
        /// pending, confirmed, or declined
        status: String,
    },
    /// Remove a guest
    Remove {
        /// Guest ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Guest counts per RSVP status
    Summary,
}

/// Guest display row
#[derive(Debug, Serialize, Tabled)]
struct GuestRow {
    /// Guest ID
    id: String,
    /// Name
    name: String,
    /// RSVP
    rsvp: String,
    /// Table ID
    table: String,
    /// Seat index
    seat: String,
    /// Dietary notes
    dietary: String,
}

impl From<&Guest> for GuestRow {
    fn from(g: &Guest) -> Self {
        Self {
            id: g.id.to_string(),
            name: g.name.clone(),
            rsvp: g.rsvp_status.to_string(),
            table: g.table_id.map(|t| t.to_string()).unwrap_or_default(),
            seat: g.seat_index.map(|s| s.to_string()).unwrap_or_default(),
            dietary: g.dietary_notes.clone().unwrap_or_default(),
        }
    }
}

/// Parse a guest ID argument
pub(crate) fn parse_guest_id(raw: &str) -> Result<GuestId, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid guest ID: '{raw}'")))
}

/// Execute guest commands
pub async fn execute(
    args: &GuestArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::connect_services(config).await?;
    let guests = &services.guests;

    match &args.command {
        GuestCommand::List { rsvp, unassigned } => {
            let filter = rsvp.as_deref().map(str::parse::<RsvpStatus>).transpose()?;
            let rows: Vec<GuestRow> = guests
                .list_guests()
                .await?
                .iter()
                .filter(|g| filter.is_none_or(|s| g.rsvp_status == s))
                .filter(|g| !*unassigned || !g.is_assigned())
                .map(GuestRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        GuestCommand::Add {
            name,
            email,
            rsvp,
            dietary,
        } => {
            let guest = guests
                .create_guest(
                    &services.ctx,
                    CreateGuest {
                        name: name.clone(),
                        email: email.clone(),
                        rsvp_status: rsvp.parse()?,
                        dietary_notes: dietary.clone(),
                    },
                )
                .await?;
            output::print_success(&format!("Guest '{}' added ({})", guest.name, guest.id));
        }
        GuestCommand::Rsvp { id, status } => {
            let guest = guests
                .update_rsvp(&services.ctx, parse_guest_id(id)?, status.parse()?)
                .await?;
            output::print_success(&format!("{} is now {}", guest.name, guest.rsvp_status));
            if guest.rsvp_status == RsvpStatus::Declined && guest.is_assigned() {
                output::print_warning(
                    "Guest still holds a seat; run `wedplan seat unassign` to free it.",
                );
            }
        }
        GuestCommand::Remove { id, force } => {
            let guest_id = parse_guest_id(id)?;
            let guest = guests.get_guest(guest_id).await?;

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Remove guest '{}'?", guest.name))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            guests.delete_guest(&services.ctx, guest_id).await?;
            output::print_success(&format!("Guest '{}' removed", guest.name));
        }
        GuestCommand::Summary => {
            let summary = guests.rsvp_summary().await?;
            match format {
                OutputFormat::Json => output::print_json(&summary),
                OutputFormat::Table => {
                    println!("RSVP summary:");
                    output::print_kv("Pending", &summary.pending.to_string());
                    output::print_kv("Confirmed", &summary.confirmed.to_string());
                    output::print_kv("Declined", &summary.declined.to_string());
                    output::print_kv("Total", &summary.total.to_string());
                }
            }
        }
    }

    Ok(())
}
