use crate::office::store::StoreError;

use super::domain::{
    ClientInquiry, Complaint, ComplaintId, InquiryId, ServiceRequest, ServiceRequestId,
};

pub trait ComplaintRepository: Send + Sync {
    fn insert(&self, record: Complaint) -> Result<Complaint, StoreError>;
    fn update(&self, record: Complaint) -> Result<(), StoreError>;
    fn delete(&self, id: &ComplaintId) -> Result<(), StoreError>;
    fn fetch(&self, id: &ComplaintId) -> Result<Option<Complaint>, StoreError>;
    fn list(&self) -> Result<Vec<Complaint>, StoreError>;
}

pub trait ServiceRequestRepository: Send + Sync {
    fn insert(&self, record: ServiceRequest) -> Result<ServiceRequest, StoreError>;
    fn update(&self, record: ServiceRequest) -> Result<(), StoreError>;
    fn delete(&self, id: &ServiceRequestId) -> Result<(), StoreError>;
    fn fetch(&self, id: &ServiceRequestId) -> Result<Option<ServiceRequest>, StoreError>;
    fn list(&self) -> Result<Vec<ServiceRequest>, StoreError>;
}

/// Inquiries are never deleted from the screen; stale ones are just closed.
pub trait InquiryRepository: Send + Sync {
    fn insert(&self, record: ClientInquiry) -> Result<ClientInquiry, StoreError>;
    fn update(&self, record: ClientInquiry) -> Result<(), StoreError>;
    fn fetch(&self, id: &InquiryId) -> Result<Option<ClientInquiry>, StoreError>;
    fn list(&self) -> Result<Vec<ClientInquiry>, StoreError>;
}
