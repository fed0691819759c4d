//! Guest CRUD and RSVP updates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use wedplan_core::error::AppError;
use wedplan_core::redact::{mask_email, mask_name};
use wedplan_core::result::AppResult;
use wedplan_core::types::GuestId;
use wedplan_entity::guest::{CreateGuest, Guest, RsvpStatus};
use wedplan_seating::SeatLedger;

use crate::audit::{SeatingAudit, actions};
use crate::context::RequestContext;

/// Maximum length of a guest name.
const MAX_NAME_LEN: usize = 200;

/// Guest counts per RSVP status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpSummary {
    /// Guests who have not answered.
    pub pending: i64,
    /// Guests who accepted.
    pub confirmed: i64,
    /// Guests who declined.
    pub declined: i64,
    /// All guests.
    pub total: i64,
}

impl RsvpSummary {
    fn from_counts(counts: &[(RsvpStatus, i64)]) -> Self {
        let mut summary = Self::default();
        for &(status, count) in counts {
            match status {
                RsvpStatus::Pending => summary.pending += count,
                RsvpStatus::Confirmed => summary.confirmed += count,
                RsvpStatus::Declined => summary.declined += count,
            }
            summary.total += count;
        }
        summary
    }
}

/// Manages the guest list.
#[derive(Debug, Clone)]
pub struct GuestService {
    /// Guest/table storage.
    ledger: Arc<dyn SeatLedger>,
    /// Audit trail.
    audit: Arc<SeatingAudit>,
}

impl GuestService {
    /// Creates a new guest service.
    pub fn new(ledger: Arc<dyn SeatLedger>, audit: Arc<SeatingAudit>) -> Self {
        Self { ledger, audit }
    }

    /// Lists all guests ordered by name.
    pub async fn list_guests(&self) -> AppResult<Vec<Guest>> {
        self.ledger.list_guests().await
    }

    /// Gets a guest by ID.
    pub async fn get_guest(&self, id: GuestId) -> AppResult<Guest> {
        self.ledger
            .find_guest(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))
    }

    /// Adds a guest. New guests are never seated.
    pub async fn create_guest(&self, ctx: &RequestContext, mut data: CreateGuest) -> AppResult<Guest> {
        data.name = data.name.trim().to_string();
        if data.name.is_empty() {
            return Err(AppError::validation("Guest name must not be empty"));
        }
        if data.name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::validation(format!(
                "Guest name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        data.email = data
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        if let Some(email) = &data.email {
            if !is_plausible_email(email) {
                return Err(AppError::validation(format!(
                    "Invalid email address: {}",
                    mask_email(email)
                )));
            }
        }

        let guest = self.ledger.create_guest(data).await?;
        info!(guest_id = %guest.id, guest = %mask_name(&guest.name), "Guest created");
        self.audit
            .record(
                ctx,
                actions::GUEST_CREATE,
                "guest",
                Some(guest.id.into_uuid()),
                Some(json!({ "guest": mask_name(&guest.name), "rsvp": guest.rsvp_status })),
            )
            .await;
        Ok(guest)
    }

    /// Records a guest's RSVP answer.
    ///
    /// A seated guest who declines keeps the seat; the caller decides whether
    /// to unassign them.
    pub async fn update_rsvp(
        &self,
        ctx: &RequestContext,
        id: GuestId,
        status: RsvpStatus,
    ) -> AppResult<Guest> {
        let guest = self
            .ledger
            .update_rsvp(id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))?;

        if status == RsvpStatus::Declined && guest.is_assigned() {
            warn!(
                guest_id = %id,
                table_id = ?guest.table_id,
                "Seated guest declined; seat left assigned"
            );
        }
        self.audit
            .record(
                ctx,
                actions::GUEST_RSVP,
                "guest",
                Some(id.into_uuid()),
                Some(json!({ "rsvp": status, "seated": guest.is_assigned() })),
            )
            .await;
        Ok(guest)
    }

    /// Removes a guest, releasing any seat they held.
    pub async fn delete_guest(&self, ctx: &RequestContext, id: GuestId) -> AppResult<()> {
        if !self.ledger.delete_guest(id).await? {
            return Err(AppError::not_found(format!("Guest {id} not found")));
        }
        info!(guest_id = %id, "Guest deleted");
        self.audit
            .record(ctx, actions::GUEST_DELETE, "guest", Some(id.into_uuid()), None)
            .await;
        Ok(())
    }

    /// Guest counts per RSVP status.
    pub async fn rsvp_summary(&self) -> AppResult<RsvpSummary> {
        let counts = self.ledger.count_by_rsvp().await?;
        Ok(RsvpSummary::from_counts(&counts))
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use wedplan_core::error::ErrorKind;
    use wedplan_seating::MemorySeatLedger;

    use super::*;

    fn service() -> GuestService {
        GuestService::new(
            Arc::new(MemorySeatLedger::new()),
            Arc::new(SeatingAudit::log_only()),
        )
    }

    fn create(name: &str, email: Option<&str>) -> CreateGuest {
        CreateGuest {
            name: name.into(),
            email: email.map(String::from),
            rsvp_status: RsvpStatus::Pending,
            dietary_notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_validates() {
        let svc = service();
        let ctx = RequestContext::system("test");

        let guest = svc.create_guest(&ctx, create("  Ada  ", Some(" "))).await.unwrap();
        assert_eq!(guest.name, "Ada");
        assert_eq!(guest.email, None);

        let err = svc.create_guest(&ctx, create("   ", None)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .create_guest(&ctx, create("Bob", Some("bob-at-example")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(!err.message.contains("bob-at-example"));
    }

    #[tokio::test]
    async fn test_rsvp_summary() {
        let svc = service();
        let ctx = RequestContext::system("test");
        let a = svc.create_guest(&ctx, create("A", None)).await.unwrap();
        let b = svc.create_guest(&ctx, create("B", None)).await.unwrap();
        svc.create_guest(&ctx, create("C", None)).await.unwrap();

        svc.update_rsvp(&ctx, a.id, RsvpStatus::Confirmed).await.unwrap();
        svc.update_rsvp(&ctx, b.id, RsvpStatus::Declined).await.unwrap();

        let summary = svc.rsvp_summary().await.unwrap();
        assert_eq!(
            summary,
            RsvpSummary {
                pending: 1,
                confirmed: 1,
                declined: 1,
                total: 3
            }
        );
    }

    #[tokio::test]
    async fn test_missing_guest() {
        let svc = service();
        let ctx = RequestContext::system("test");
        let id = GuestId::new();
        assert_eq!(svc.get_guest(id).await.unwrap_err().kind, ErrorKind::NotFound);
        assert_eq!(
            svc.update_rsvp(&ctx, id, RsvpStatus::Confirmed)
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );
        assert_eq!(svc.delete_guest(&ctx, id).await.unwrap_err().kind, ErrorKind::NotFound);
    }
}
