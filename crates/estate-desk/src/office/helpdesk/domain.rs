use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::office::directory::{ContractId, HomeownerId, PropertyId};

/// Identifier wrapper for complaints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub String);

/// Identifier wrapper for maintenance service requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceRequestId(pub String);

/// Identifier wrapper for client inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::InProgress, Self::Resolved, Self::Closed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Open => "open",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Resolved and closed complaints drop out of the active queue.
    pub const fn is_active(self) -> bool {
        matches!(self, ComplaintStatus::Open | ComplaintStatus::InProgress)
    }
}

/// A homeowner complaint tied to a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub contract_id: ContractId,
    pub subject: String,
    pub details: String,
    pub status: ComplaintStatus,
    pub filed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Complaint form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComplaint {
    pub contract_id: ContractId,
    pub subject: String,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    Structural,
    Landscaping,
    Security,
    Other,
}

impl ServiceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::Structural => "structural",
            ServiceCategory::Landscaping => "landscaping",
            ServiceCategory::Security => "security",
            ServiceCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "plumbing" => Some(Self::Plumbing),
            "electrical" => Some(Self::Electrical),
            "structural" => Some(Self::Structural),
            "landscaping" => Some(Self::Landscaping),
            "security" => Some(Self::Security),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestStatus {
    Requested,
    Scheduled,
    InProgress,
    Done,
    Cancelled,
}

impl ServiceRequestStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Requested,
            Self::Scheduled,
            Self::InProgress,
            Self::Done,
            Self::Cancelled,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ServiceRequestStatus::Requested => "requested",
            ServiceRequestStatus::Scheduled => "scheduled",
            ServiceRequestStatus::InProgress => "in_progress",
            ServiceRequestStatus::Done => "done",
            ServiceRequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "requested" => Some(Self::Requested),
            "scheduled" => Some(Self::Scheduled),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// A maintenance job requested for a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub homeowner_id: HomeownerId,
    pub property_id: PropertyId,
    pub category: ServiceCategory,
    pub description: String,
    pub status: ServiceRequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<NaiveDate>,
    pub filed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Service request form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewServiceRequest {
    pub homeowner_id: HomeownerId,
    pub property_id: PropertyId,
    pub category: ServiceCategory,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    New,
    Contacted,
    Closed,
}

impl InquiryStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::New, Self::Contacted, Self::Closed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A prospect asking about a property, captured from the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInquiry {
    pub id: InquiryId,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub property_interest: String,
    pub message: String,
    pub status: InquiryStatus,
    pub received_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inquiry form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInquiry {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub property_interest: String,
    pub message: String,
}
