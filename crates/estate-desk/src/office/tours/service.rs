use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::office::broadcast::{BroadcastEvent, BroadcastPublisher};
use crate::office::store::StoreError;

use super::approval::{self, ApprovalError, ReviewAction};
use super::domain::{AppointmentStatus, StaffRole, TourAppointment, TourId, TourRequest};
use super::repository::TourRepository;

/// Realtime channel the tour desk publishes to.
const TOURS_CHANNEL: &str = "tours";

/// Error raised by the tour desk.
#[derive(Debug, thiserror::Error)]
pub enum TourDeskError {
    #[error(transparent)]
    Approval(#[from] ApprovalError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown appointment status '{0}'")]
    UnknownStatus(String),
    #[error("role '{0}' may not edit appointment status directly")]
    NotAdmin(&'static str),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("tour date {0} has already passed")]
    DateInPast(NaiveDate),
}

static TOUR_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_tour_id() -> TourId {
    let id = TOUR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TourId(format!("tour-{id:06}"))
}

/// Service composing booking intake, the review chain, and the realtime
/// relay. Timestamps are passed in by the caller so behavior stays
/// deterministic under test.
pub struct TourDeskService<R, B> {
    repository: Arc<R>,
    broadcast: Arc<B>,
}

impl<R, B> TourDeskService<R, B>
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    pub fn new(repository: Arc<R>, broadcast: Arc<B>) -> Self {
        Self {
            repository,
            broadcast,
        }
    }

    /// Accept a booking from the public site. The slot date must not be in
    /// the past relative to the caller-supplied clock.
    pub fn book(
        &self,
        request: TourRequest,
        now: DateTime<Utc>,
    ) -> Result<TourAppointment, TourDeskError> {
        if request.client_name.trim().is_empty() {
            return Err(TourDeskError::MissingField("client_name"));
        }
        if request.scheduled_for < now.date_naive() {
            return Err(TourDeskError::DateInPast(request.scheduled_for));
        }

        let record = TourAppointment {
            id: next_tour_id(),
            property_id: request.property_id,
            client_name: request.client_name,
            email: request.email,
            phone: request.phone,
            scheduled_for: request.scheduled_for,
            time_slot: request.time_slot,
            status: AppointmentStatus::Pending,
            cs_notes: None,
            sales_notes: None,
            rejection_reason: None,
            requested_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        self.relay("appointment_requested", &stored);
        Ok(stored)
    }

    /// Full snapshot, optionally narrowed to one status in memory.
    pub fn list(
        &self,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<TourAppointment>, TourDeskError> {
        let mut records = self.repository.list()?;
        if let Some(wanted) = status {
            records.retain(|record| record.status == wanted);
        }
        records.sort_by(|a, b| a.scheduled_for.cmp(&b.scheduled_for));
        Ok(records)
    }

    /// Apply a review decision for the stage the appointment currently
    /// waits on. An empty rejection reason is refused before the store is
    /// touched at all.
    pub fn review(
        &self,
        id: &TourId,
        actor: StaffRole,
        action: ReviewAction,
        now: DateTime<Utc>,
    ) -> Result<TourAppointment, TourDeskError> {
        let action = match action {
            ReviewAction::Reject { reason } => ReviewAction::Reject {
                reason: approval::validate_reason(&reason)?,
            },
            approve => approve,
        };

        let mut record = self.repository.fetch(id)?.ok_or(StoreError::NotFound)?;
        let previous = record.status;
        let next = approval::review(previous, actor, &action)?;

        match (&action, previous) {
            (ReviewAction::Approve { notes }, AppointmentStatus::Pending) => {
                record.cs_notes = notes.clone();
            }
            (ReviewAction::Approve { notes }, AppointmentStatus::CsApproved) => {
                record.sales_notes = notes.clone();
            }
            (ReviewAction::Reject { reason }, _) => {
                record.rejection_reason = Some(reason.clone());
            }
            _ => {}
        }

        record.status = next;
        record.updated_at = now;
        self.repository.update(record.clone())?;
        self.relay("appointment_updated", &record);
        Ok(record)
    }

    /// Direct status edit for administrative states. Validates enum
    /// membership and the admin role, nothing else: no transition table,
    /// last write wins.
    pub fn override_status(
        &self,
        id: &TourId,
        actor: StaffRole,
        status_raw: &str,
        now: DateTime<Utc>,
    ) -> Result<TourAppointment, TourDeskError> {
        if actor != StaffRole::Admin {
            return Err(TourDeskError::NotAdmin(actor.label()));
        }
        let status = AppointmentStatus::parse(status_raw)
            .ok_or_else(|| TourDeskError::UnknownStatus(status_raw.to_string()))?;

        let mut record = self.repository.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.status = status;
        record.updated_at = now;
        self.repository.update(record.clone())?;
        self.relay("appointment_updated", &record);
        Ok(record)
    }

    pub fn get(&self, id: &TourId) -> Result<TourAppointment, TourDeskError> {
        let record = self.repository.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    /// Hand the change to the realtime relay. The status change is already
    /// persisted, so a relay failure stays local instead of failing the
    /// request.
    fn relay(&self, event_type: &str, record: &TourAppointment) {
        let event = BroadcastEvent::new(
            TOURS_CHANNEL,
            event_type,
            json!({
                "id": record.id.0,
                "status": record.status.label(),
                "property_id": record.property_id.0,
            }),
        );
        let _ = self.broadcast.publish(event);
    }
}
