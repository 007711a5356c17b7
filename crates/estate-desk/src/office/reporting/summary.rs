use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::office::billing::{BillingRecord, PaymentTransaction};
use crate::office::directory::{Property, PropertyStatus};
use crate::office::helpdesk::{
    ClientInquiry, Complaint, ComplaintStatus, InquiryStatus, ServiceRequest, ServiceRequestStatus,
};
use crate::office::tours::{AppointmentStatus, TourAppointment};

use super::insights::{generate_insights, OfficeInsights};

/// Record slices the snapshot is computed from. The caller owns the data;
/// the report borrows it for the build and returns owned figures.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub billing: &'a [BillingRecord],
    pub transactions: &'a [PaymentTransaction],
    pub complaints: &'a [Complaint],
    pub service_requests: &'a [ServiceRequest],
    pub inquiries: &'a [ClientInquiry],
    pub tours: &'a [TourAppointment],
    pub properties: &'a [Property],
}

/// Billing collection figures as of a given date. Amounts are whole pesos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub total_billed: i64,
    pub total_collected: i64,
    pub outstanding: i64,
    /// Collected over billed, as a percentage rounded to one decimal.
    pub collection_rate: f64,
    /// Charges past their due date and not yet settled.
    pub overdue_count: usize,
    pub payments_recorded: usize,
}

/// One status bucket in a queue tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub status: &'static str,
    pub count: usize,
}

/// Unit counts for one phase of the estate. Reserved units count toward the
/// total but sit in neither of the other two buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyEntry {
    pub phase: String,
    pub total: usize,
    pub sold_or_leased: usize,
    pub available: usize,
}

/// The full back-office snapshot served by the report endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OfficeReport {
    pub as_of: NaiveDate,
    pub collections: CollectionSummary,
    pub complaint_tallies: Vec<StatusTally>,
    pub service_request_tallies: Vec<StatusTally>,
    pub inquiry_tallies: Vec<StatusTally>,
    pub tour_pipeline: Vec<StatusTally>,
    pub occupancy: Vec<OccupancyEntry>,
    pub insights: OfficeInsights,
}

impl OfficeReport {
    pub fn build(inputs: &ReportInputs<'_>, as_of: NaiveDate) -> Self {
        let collections = collection_summary(inputs.billing, inputs.transactions, as_of);

        let complaint_tallies = ComplaintStatus::ordered()
            .into_iter()
            .map(|status| StatusTally {
                status: status.label(),
                count: inputs
                    .complaints
                    .iter()
                    .filter(|record| record.status == status)
                    .count(),
            })
            .collect();

        let service_request_tallies = ServiceRequestStatus::ordered()
            .into_iter()
            .map(|status| StatusTally {
                status: status.label(),
                count: inputs
                    .service_requests
                    .iter()
                    .filter(|record| record.status == status)
                    .count(),
            })
            .collect();

        let inquiry_tallies = InquiryStatus::ordered()
            .into_iter()
            .map(|status| StatusTally {
                status: status.label(),
                count: inputs
                    .inquiries
                    .iter()
                    .filter(|record| record.status == status)
                    .count(),
            })
            .collect();

        let tour_pipeline = AppointmentStatus::ordered()
            .into_iter()
            .map(|status| StatusTally {
                status: status.label(),
                count: inputs
                    .tours
                    .iter()
                    .filter(|record| record.status == status)
                    .count(),
            })
            .collect();

        let occupancy = occupancy_by_phase(inputs.properties);
        let insights = generate_insights(&collections, inputs.complaints, inputs.tours, as_of);

        OfficeReport {
            as_of,
            collections,
            complaint_tallies,
            service_request_tallies,
            inquiry_tallies,
            tour_pipeline,
            occupancy,
            insights,
        }
    }
}

fn collection_summary(
    billing: &[BillingRecord],
    transactions: &[PaymentTransaction],
    as_of: NaiveDate,
) -> CollectionSummary {
    let total_billed: i64 = billing.iter().map(|record| record.amount_due).sum();
    let outstanding: i64 = billing.iter().map(|record| record.balance).sum();
    let total_collected = total_billed - outstanding;

    let collection_rate = if total_billed > 0 {
        ((total_collected as f64 / total_billed as f64) * 1000.0).round() / 10.0
    } else {
        0.0
    };

    let overdue_count = billing
        .iter()
        .filter(|record| !record.status.is_settled() && record.due_date < as_of)
        .count();

    CollectionSummary {
        total_billed,
        total_collected,
        outstanding,
        collection_rate,
        overdue_count,
        payments_recorded: transactions.len(),
    }
}

fn occupancy_by_phase(properties: &[Property]) -> Vec<OccupancyEntry> {
    let mut phases: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
    for property in properties {
        let slot = phases.entry(property.phase.as_str()).or_insert((0, 0, 0));
        slot.0 += 1;
        match property.status {
            PropertyStatus::Sold | PropertyStatus::Leased => slot.1 += 1,
            PropertyStatus::Available => slot.2 += 1,
            PropertyStatus::Reserved => {}
        }
    }

    phases
        .into_iter()
        .map(|(phase, (total, sold_or_leased, available))| OccupancyEntry {
            phase: phase.to_string(),
            total,
            sold_or_leased,
            available,
        })
        .collect()
}
