use chrono::NaiveDate;
use serde::Serialize;

use crate::office::helpdesk::Complaint;
use crate::office::tours::{AppointmentStatus, TourAppointment};

use super::summary::CollectionSummary;

/// Banding of the collection rate for the report headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionBand {
    Healthy,
    Watch,
    Critical,
}

impl CollectionBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Watch => "Watch",
            Self::Critical => "Critical",
        }
    }
}

/// Headline observations derived from the snapshot. Deterministic from the
/// inputs; no clock reads, no I/O.
#[derive(Debug, Clone, Serialize)]
pub struct OfficeInsights {
    pub collection_band: CollectionBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_open_complaint_days: Option<i64>,
    pub pending_tours: usize,
    pub observations: Vec<String>,
}

pub(crate) fn generate_insights(
    collections: &CollectionSummary,
    complaints: &[Complaint],
    tours: &[TourAppointment],
    as_of: NaiveDate,
) -> OfficeInsights {
    let collection_band = if collections.collection_rate >= 90.0 {
        CollectionBand::Healthy
    } else if collections.collection_rate >= 70.0 {
        CollectionBand::Watch
    } else {
        CollectionBand::Critical
    };

    let oldest_open_complaint_days = complaints
        .iter()
        .filter(|record| record.status.is_active())
        .map(|record| (as_of - record.filed_at.date_naive()).num_days())
        .max();

    let pending_tours = tours
        .iter()
        .filter(|record| record.status == AppointmentStatus::Pending)
        .count();

    let mut observations = Vec::new();
    if collections.total_billed > 0 {
        observations.push(format!(
            "Collections at {:.1}% of billed dues",
            collections.collection_rate
        ));
    }

    if collections.overdue_count > 0 {
        observations.push(format!(
            "{} charge(s) past due awaiting follow-up",
            collections.overdue_count
        ));
    }

    if let Some(days) = oldest_open_complaint_days {
        if days >= 14 {
            observations.push(format!("Oldest open complaint has waited {days} day(s)"));
        }
    }

    if pending_tours >= 5 {
        observations.push(format!(
            "{pending_tours} tour request(s) waiting on customer service review"
        ));
    }

    if observations.is_empty() {
        observations.push("No follow-ups flagged; queues are current".to_string());
    }

    OfficeInsights {
        collection_band,
        oldest_open_complaint_days,
        pending_tours,
        observations,
    }
}
