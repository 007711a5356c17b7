use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::office::broadcast::{BroadcastError, BroadcastEvent, BroadcastPublisher};
use crate::office::directory::{ContractId, HomeownerId, PropertyId};
use crate::office::helpdesk::domain::{
    ClientInquiry, Complaint, ComplaintId, InquiryId, NewComplaint, NewInquiry, NewServiceRequest,
    ServiceCategory, ServiceRequest, ServiceRequestId,
};
use crate::office::helpdesk::repository::{
    ComplaintRepository, InquiryRepository, ServiceRequestRepository,
};
use crate::office::helpdesk::{helpdesk_router, HelpdeskService};
use crate::office::store::StoreError;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 6, 14, 0, 0).single().expect("valid clock")
}

pub(super) fn complaint_form() -> NewComplaint {
    NewComplaint {
        contract_id: ContractId("ct-000004".to_string()),
        subject: "Street light flickering".to_string(),
        details: "The lamp post outside Block 4 Lot 7 has been flickering all week.".to_string(),
    }
}

pub(super) fn request_form() -> NewServiceRequest {
    NewServiceRequest {
        homeowner_id: HomeownerId("ho-000012".to_string()),
        property_id: PropertyId("prop-000014".to_string()),
        category: ServiceCategory::Plumbing,
        description: "Kitchen drain backs up after heavy rain.".to_string(),
    }
}

pub(super) fn inquiry_form() -> NewInquiry {
    NewInquiry {
        client_name: "Paolo Reyes".to_string(),
        email: "paolo.reyes@example.com".to_string(),
        phone: "0917-555-0101".to_string(),
        property_interest: "Corner lot along Phase 2".to_string(),
        message: "Is the corner unit still open for tripping this month?".to_string(),
    }
}

pub(super) type Desk =
    HelpdeskService<MemoryComplaints, MemoryRequests, MemoryInquiries, MemoryBroadcast>;

pub(super) fn build_desk() -> (
    Desk,
    Arc<MemoryComplaints>,
    Arc<MemoryRequests>,
    Arc<MemoryInquiries>,
    Arc<MemoryBroadcast>,
) {
    let complaints = Arc::new(MemoryComplaints::default());
    let requests = Arc::new(MemoryRequests::default());
    let inquiries = Arc::new(MemoryInquiries::default());
    let broadcast = Arc::new(MemoryBroadcast::default());
    let service = HelpdeskService::new(
        complaints.clone(),
        requests.clone(),
        inquiries.clone(),
        broadcast.clone(),
    );
    (service, complaints, requests, inquiries, broadcast)
}

#[derive(Default, Clone)]
pub(super) struct MemoryComplaints {
    pub(super) records: Arc<Mutex<HashMap<ComplaintId, Complaint>>>,
}

impl ComplaintRepository for MemoryComplaints {
    fn insert(&self, record: Complaint) -> Result<Complaint, StoreError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: Complaint) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn delete(&self, id: &ComplaintId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("complaint mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, id: &ComplaintId) -> Result<Option<Complaint>, StoreError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Complaint>, StoreError> {
        let guard = self.records.lock().expect("complaint mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRequests {
    pub(super) records: Arc<Mutex<HashMap<ServiceRequestId, ServiceRequest>>>,
}

impl ServiceRequestRepository for MemoryRequests {
    fn insert(&self, record: ServiceRequest) -> Result<ServiceRequest, StoreError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ServiceRequest) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn delete(&self, id: &ServiceRequestId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("request mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, id: &ServiceRequestId) -> Result<Option<ServiceRequest>, StoreError> {
        let guard = self.records.lock().expect("request mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        let guard = self.records.lock().expect("request mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryInquiries {
    pub(super) records: Arc<Mutex<HashMap<InquiryId, ClientInquiry>>>,
}

impl InquiryRepository for MemoryInquiries {
    fn insert(&self, record: ClientInquiry) -> Result<ClientInquiry, StoreError> {
        let mut guard = self.records.lock().expect("inquiry mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ClientInquiry) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("inquiry mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &InquiryId) -> Result<Option<ClientInquiry>, StoreError> {
        let guard = self.records.lock().expect("inquiry mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ClientInquiry>, StoreError> {
        let guard = self.records.lock().expect("inquiry mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBroadcast {
    events: Arc<Mutex<Vec<BroadcastEvent>>>,
}

impl MemoryBroadcast {
    pub(super) fn events(&self) -> Vec<BroadcastEvent> {
        self.events.lock().expect("broadcast mutex poisoned").clone()
    }
}

impl BroadcastPublisher for MemoryBroadcast {
    fn publish(&self, event: BroadcastEvent) -> Result<(), BroadcastError> {
        self.events
            .lock()
            .expect("broadcast mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn helpdesk_router_with_service(service: Desk) -> axum::Router {
    helpdesk_router(Arc::new(service))
}
