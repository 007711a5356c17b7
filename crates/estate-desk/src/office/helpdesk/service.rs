use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::office::broadcast::{BroadcastEvent, BroadcastPublisher};
use crate::office::store::StoreError;

use super::domain::{
    ClientInquiry, Complaint, ComplaintId, ComplaintStatus, InquiryId, InquiryStatus, NewComplaint,
    NewInquiry, NewServiceRequest, ServiceRequest, ServiceRequestId, ServiceRequestStatus,
};
use super::repository::{ComplaintRepository, InquiryRepository, ServiceRequestRepository};

/// Realtime channel for helpdesk queue movement.
const HELPDESK_CHANNEL: &str = "helpdesk";

/// Error raised by the helpdesk.
#[derive(Debug, thiserror::Error)]
pub enum HelpdeskError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

static COMPLAINT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static INQUIRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_complaint_id() -> ComplaintId {
    let id = COMPLAINT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ComplaintId(format!("cmp-{id:06}"))
}

fn next_request_id() -> ServiceRequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ServiceRequestId(format!("sr-{id:06}"))
}

fn next_inquiry_id() -> InquiryId {
    let id = INQUIRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InquiryId(format!("inq-{id:06}"))
}

/// Service behind the complaints, service-request, and inquiry screens.
pub struct HelpdeskService<C, S, I, P> {
    complaints: Arc<C>,
    requests: Arc<S>,
    inquiries: Arc<I>,
    broadcast: Arc<P>,
}

impl<C, S, I, P> HelpdeskService<C, S, I, P>
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    pub fn new(complaints: Arc<C>, requests: Arc<S>, inquiries: Arc<I>, broadcast: Arc<P>) -> Self {
        Self {
            complaints,
            requests,
            inquiries,
            broadcast,
        }
    }

    pub fn file_complaint(
        &self,
        form: NewComplaint,
        now: DateTime<Utc>,
    ) -> Result<Complaint, HelpdeskError> {
        if form.subject.trim().is_empty() {
            return Err(HelpdeskError::MissingField("subject"));
        }

        let record = Complaint {
            id: next_complaint_id(),
            contract_id: form.contract_id,
            subject: form.subject,
            details: form.details,
            status: ComplaintStatus::Open,
            filed_at: now,
            updated_at: now,
        };
        let stored = self.complaints.insert(record)?;
        Ok(stored)
    }

    pub fn list_complaints(
        &self,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<Complaint>, HelpdeskError> {
        let mut records = self.complaints.list()?;
        if let Some(wanted) = status {
            records.retain(|record| record.status == wanted);
        }
        records.sort_by(|a, b| a.filed_at.cmp(&b.filed_at));
        Ok(records)
    }

    /// Move a complaint to the given status. The raw string is checked for
    /// enum membership and nothing more.
    pub fn set_complaint_status(
        &self,
        id: &ComplaintId,
        status_raw: &str,
        now: DateTime<Utc>,
    ) -> Result<Complaint, HelpdeskError> {
        let status = ComplaintStatus::parse(status_raw)
            .ok_or_else(|| HelpdeskError::UnknownStatus(status_raw.to_string()))?;

        let mut record = self.complaints.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.status = status;
        record.updated_at = now;
        self.complaints.update(record.clone())?;

        let event = BroadcastEvent::new(
            HELPDESK_CHANNEL,
            "complaint_updated",
            json!({ "id": record.id.0, "status": record.status.label() }),
        );
        let _ = self.broadcast.publish(event);

        Ok(record)
    }

    pub fn delete_complaint(&self, id: &ComplaintId) -> Result<(), HelpdeskError> {
        self.complaints.delete(id)?;
        Ok(())
    }

    pub fn file_service_request(
        &self,
        form: NewServiceRequest,
        now: DateTime<Utc>,
    ) -> Result<ServiceRequest, HelpdeskError> {
        if form.description.trim().is_empty() {
            return Err(HelpdeskError::MissingField("description"));
        }

        let record = ServiceRequest {
            id: next_request_id(),
            homeowner_id: form.homeowner_id,
            property_id: form.property_id,
            category: form.category,
            description: form.description,
            status: ServiceRequestStatus::Requested,
            scheduled_for: None,
            filed_at: now,
            updated_at: now,
        };
        let stored = self.requests.insert(record)?;
        Ok(stored)
    }

    pub fn list_service_requests(
        &self,
        status: Option<ServiceRequestStatus>,
    ) -> Result<Vec<ServiceRequest>, HelpdeskError> {
        let mut records = self.requests.list()?;
        if let Some(wanted) = status {
            records.retain(|record| record.status == wanted);
        }
        records.sort_by(|a, b| a.filed_at.cmp(&b.filed_at));
        Ok(records)
    }

    /// Status patch for a service request, optionally pinning the visit
    /// date at the same time.
    pub fn update_service_request(
        &self,
        id: &ServiceRequestId,
        status_raw: &str,
        scheduled_for: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<ServiceRequest, HelpdeskError> {
        let status = ServiceRequestStatus::parse(status_raw)
            .ok_or_else(|| HelpdeskError::UnknownStatus(status_raw.to_string()))?;

        let mut record = self.requests.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.status = status;
        if scheduled_for.is_some() {
            record.scheduled_for = scheduled_for;
        }
        record.updated_at = now;
        self.requests.update(record.clone())?;

        let event = BroadcastEvent::new(
            HELPDESK_CHANNEL,
            "service_request_updated",
            json!({ "id": record.id.0, "status": record.status.label() }),
        );
        let _ = self.broadcast.publish(event);

        Ok(record)
    }

    pub fn delete_service_request(&self, id: &ServiceRequestId) -> Result<(), HelpdeskError> {
        self.requests.delete(id)?;
        Ok(())
    }

    pub fn receive_inquiry(
        &self,
        form: NewInquiry,
        now: DateTime<Utc>,
    ) -> Result<ClientInquiry, HelpdeskError> {
        if form.client_name.trim().is_empty() {
            return Err(HelpdeskError::MissingField("client_name"));
        }

        let record = ClientInquiry {
            id: next_inquiry_id(),
            client_name: form.client_name,
            email: form.email,
            phone: form.phone,
            property_interest: form.property_interest,
            message: form.message,
            status: InquiryStatus::New,
            received_at: now,
            updated_at: now,
        };
        let stored = self.inquiries.insert(record)?;
        Ok(stored)
    }

    pub fn list_inquiries(
        &self,
        status: Option<InquiryStatus>,
    ) -> Result<Vec<ClientInquiry>, HelpdeskError> {
        let mut records = self.inquiries.list()?;
        if let Some(wanted) = status {
            records.retain(|record| record.status == wanted);
        }
        records.sort_by(|a, b| a.received_at.cmp(&b.received_at));
        Ok(records)
    }

    pub fn set_inquiry_status(
        &self,
        id: &InquiryId,
        status_raw: &str,
        now: DateTime<Utc>,
    ) -> Result<ClientInquiry, HelpdeskError> {
        let status = InquiryStatus::parse(status_raw)
            .ok_or_else(|| HelpdeskError::UnknownStatus(status_raw.to_string()))?;

        let mut record = self.inquiries.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.status = status;
        record.updated_at = now;
        self.inquiries.update(record.clone())?;
        Ok(record)
    }
}
