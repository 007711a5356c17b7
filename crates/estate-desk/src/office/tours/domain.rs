use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::office::directory::PropertyId;

/// Identifier wrapper for tour appointments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TourId(pub String);

/// Lifecycle of a tour appointment. The first three states form the review
/// chain; the rest are administrative and set by direct status edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    CsApproved,
    SalesApproved,
    Rejected,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Pending,
            Self::CsApproved,
            Self::SalesApproved,
            Self::Rejected,
            Self::Confirmed,
            Self::Cancelled,
            Self::Completed,
            Self::NoShow,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::CsApproved => "cs_approved",
            AppointmentStatus::SalesApproved => "sales_approved",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// Membership check for status strings arriving over the wire.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(Self::Pending),
            "cs_approved" => Some(Self::CsApproved),
            "sales_approved" => Some(Self::SalesApproved),
            "rejected" => Some(Self::Rejected),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }
}

/// Staff roles recognized by the review endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    CustomerService,
    Sales,
    Admin,
}

impl StaffRole {
    pub const fn label(self) -> &'static str {
        match self {
            StaffRole::CustomerService => "customer_service",
            StaffRole::Sales => "sales",
            StaffRole::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "customer_service" => Some(Self::CustomerService),
            "sales" => Some(Self::Sales),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A scheduled property-viewing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourAppointment {
    pub id: TourId,
    pub property_id: PropertyId,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub scheduled_for: NaiveDate,
    pub time_slot: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cs_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking form payload from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourRequest {
    pub property_id: PropertyId,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub scheduled_for: NaiveDate,
    pub time_slot: String,
}
