//! Complaints, maintenance service requests, and client inquiries. All
//! three are plain status-tracked records: filed through a form, moved
//! along by a status patch, and in the first two cases hard-deleted from
//! the list screen.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ClientInquiry, Complaint, ComplaintId, ComplaintStatus, InquiryId, InquiryStatus, NewComplaint,
    NewInquiry, NewServiceRequest, ServiceCategory, ServiceRequest, ServiceRequestId,
    ServiceRequestStatus,
};
pub use repository::{ComplaintRepository, InquiryRepository, ServiceRequestRepository};
pub use router::helpdesk_router;
pub use service::{HelpdeskError, HelpdeskService};
