use crate::infra::{
    InMemoryAnnouncementRepository, InMemoryBillingRepository, InMemoryBroadcastPublisher,
    InMemoryComplaintRepository, InMemoryContractRepository, InMemoryHomeownerRepository,
    InMemoryInquiryRepository, InMemoryPropertyRepository, InMemoryPropertyTypeRepository,
    InMemoryServiceRequestRepository, InMemoryTourRepository, InMemoryTransactionRepository,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Args;
use estate_desk::config::OfficeConfig;
use estate_desk::error::AppError;
use estate_desk::office::announcements::{AnnouncementService, Audience, NewAnnouncement};
use estate_desk::office::billing::{
    BillingDeskService, BillingFilter, NewBillingRecord, NewPayment, PaymentMethod,
};
use estate_desk::office::directory::{
    ContractKind, DirectoryService, NewContract, NewHomeowner, NewProperty, NewPropertyType,
    PropertyStatus,
};
use estate_desk::office::helpdesk::{
    HelpdeskService, NewComplaint, NewInquiry, NewServiceRequest, ServiceCategory,
};
use estate_desk::office::reporting::{export, OfficeReport, ReportInputs};
use estate_desk::office::tours::{ReviewAction, StaffRole, TourDeskService, TourRequest};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Day the walkthrough runs on (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let now = as_of
        .and_hms_opt(9, 0, 0)
        .map(|stamp| stamp.and_utc())
        .unwrap_or_else(Utc::now);

    println!("Estate back-office walkthrough ({as_of})");
    if let Err(err) = script_office_day(as_of, now) {
        println!("Walkthrough step failed: {err}");
    }
    Ok(())
}

/// One scripted day at the desk: seed the directory, bill and collect dues,
/// work the helpdesk queues, run a tour through both approvals, publish a
/// notice, then print the snapshot the report endpoint would serve.
fn script_office_day(
    as_of: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let broadcast = Arc::new(InMemoryBroadcastPublisher::default());

    let directory = DirectoryService::new(
        Arc::new(InMemoryPropertyTypeRepository::default()),
        Arc::new(InMemoryPropertyRepository::default()),
        Arc::new(InMemoryHomeownerRepository::default()),
        Arc::new(InMemoryContractRepository::default()),
    );
    let billing_desk = BillingDeskService::new(
        Arc::new(InMemoryBillingRepository::default()),
        Arc::new(InMemoryTransactionRepository::default()),
        broadcast.clone(),
        OfficeConfig {
            org_name: "Vista Verde Estates".to_string(),
            receipt_footer: "Keep this copy for your records.".to_string(),
        },
    );
    let tour_desk = TourDeskService::new(
        Arc::new(InMemoryTourRepository::default()),
        broadcast.clone(),
    );
    let helpdesk = HelpdeskService::new(
        Arc::new(InMemoryComplaintRepository::default()),
        Arc::new(InMemoryServiceRequestRepository::default()),
        Arc::new(InMemoryInquiryRepository::default()),
        broadcast.clone(),
    );
    let board = AnnouncementService::new(
        Arc::new(InMemoryAnnouncementRepository::default()),
        broadcast.clone(),
    );

    println!("\nDirectory");
    let bungalow = directory.create_property_type(NewPropertyType {
        name: "Bungalow".to_string(),
        description: "Single-storey two-bedroom unit".to_string(),
        base_price: 1_450_000,
    })?;
    let unit = directory.create_property(NewProperty {
        code: "P1-B2-L7".to_string(),
        name: "Phase 1 Block 2 Lot 7".to_string(),
        property_type_id: bungalow.id.clone(),
        phase: "Phase 1".to_string(),
        block: "2".to_string(),
        lot: "7".to_string(),
        price: 1_480_000,
        status: PropertyStatus::Sold,
    })?;
    let showcase = directory.create_property(NewProperty {
        code: "P2-B1-L3".to_string(),
        name: "Phase 2 Block 1 Lot 3".to_string(),
        property_type_id: bungalow.id.clone(),
        phase: "Phase 2".to_string(),
        block: "1".to_string(),
        lot: "3".to_string(),
        price: 1_520_000,
        status: PropertyStatus::Available,
    })?;
    let owner = directory.create_homeowner(NewHomeowner {
        full_name: "Lucia Mercado".to_string(),
        email: "lucia.mercado@example.com".to_string(),
        phone: "0917-555-0142".to_string(),
        property_id: Some(unit.id.clone()),
        move_in_date: as_of.checked_sub_signed(chrono::Duration::days(180)),
    })?;
    let contract = directory.create_contract(NewContract {
        homeowner_id: owner.id.clone(),
        property_id: unit.id.clone(),
        kind: ContractKind::Sale,
        monthly_due: 1180,
        start_date: as_of.checked_sub_signed(chrono::Duration::days(180)).unwrap_or(as_of),
    })?;
    println!(
        "- {} holds {} under contract {}",
        owner.full_name, unit.name, contract.id.0
    );

    println!("\nBilling");
    let charge = billing_desk.create_charge(NewBillingRecord {
        contract_id: contract.id.clone(),
        period: as_of.format("%Y-%m").to_string(),
        description: "Monthly association dues".to_string(),
        amount_due: 1180,
        due_date: as_of + chrono::Duration::days(13),
    })?;
    println!(
        "- Charge {} posted for {}: {} due {}",
        charge.id.0, charge.period, charge.amount_due, charge.due_date
    );
    billing_desk.record_payment(
        NewPayment {
            billing_id: charge.id.clone(),
            payer_name: owner.full_name.clone(),
            amount: 500,
            method: PaymentMethod::Cash,
            reference_no: None,
            received_by: "Front desk".to_string(),
        },
        now,
    )?;
    let settle = billing_desk.record_payment(
        NewPayment {
            billing_id: charge.id.clone(),
            payer_name: owner.full_name.clone(),
            amount: 680,
            method: PaymentMethod::BankTransfer,
            reference_no: Some("BT-20417".to_string()),
            received_by: "Front desk".to_string(),
        },
        now,
    )?;
    let ledger = billing_desk.list_charges(&BillingFilter::default())?;
    for entry in &ledger {
        println!(
            "- Ledger {} {}: {} billed, {} open ({})",
            entry.id.0,
            entry.period,
            entry.amount_due,
            entry.balance,
            entry.status.label()
        );
    }
    let receipt = billing_desk.receipt_html(&settle.id)?;
    println!(
        "- Receipt {} rendered: {} bytes of printable HTML",
        settle.id.0,
        receipt.len()
    );

    println!("\nHelpdesk");
    let complaint = helpdesk.file_complaint(
        NewComplaint {
            contract_id: contract.id.clone(),
            subject: "Streetlight out on Block 2".to_string(),
            details: "The lamp post by lot 7 has been dark since Tuesday.".to_string(),
        },
        now,
    )?;
    let complaint = helpdesk.set_complaint_status(&complaint.id, "in_progress", now)?;
    println!(
        "- Complaint {} '{}' is {}",
        complaint.id.0,
        complaint.subject,
        complaint.status.label()
    );
    let request = helpdesk.file_service_request(
        NewServiceRequest {
            homeowner_id: owner.id.clone(),
            property_id: unit.id.clone(),
            category: ServiceCategory::Electrical,
            description: "Replace the lamp on the Block 2 streetlight".to_string(),
        },
        now,
    )?;
    println!(
        "- Service request {} filed under {}",
        request.id.0,
        request.category.label()
    );
    let inquiry = helpdesk.receive_inquiry(
        NewInquiry {
            client_name: "Ramon Diaz".to_string(),
            email: "ramon.diaz@example.com".to_string(),
            phone: "0917-555-0199".to_string(),
            property_interest: "Phase 2".to_string(),
            message: "Is the corner lot on Phase 2 still open?".to_string(),
        },
        now,
    )?;
    println!("- Inquiry {} logged from {}", inquiry.id.0, inquiry.client_name);

    println!("\nTour desk");
    let tour = tour_desk.book(
        TourRequest {
            property_id: showcase.id.clone(),
            client_name: "Ramon Diaz".to_string(),
            email: "ramon.diaz@example.com".to_string(),
            phone: "0917-555-0199".to_string(),
            scheduled_for: as_of + chrono::Duration::days(5),
            time_slot: "10:00-11:00".to_string(),
        },
        now,
    )?;
    tour_desk.review(
        &tour.id,
        StaffRole::CustomerService,
        ReviewAction::Approve {
            notes: Some("Client pre-screened by phone".to_string()),
        },
        now,
    )?;
    let tour = tour_desk.review(
        &tour.id,
        StaffRole::Sales,
        ReviewAction::Approve { notes: None },
        now,
    )?;
    println!(
        "- Tour {} for {} on {} is {}",
        tour.id.0,
        tour.client_name,
        tour.scheduled_for,
        tour.status.label()
    );

    println!("\nAnnouncements");
    let notice = board.draft(
        NewAnnouncement {
            title: "Water interruption on Saturday".to_string(),
            body: "Supply is off from 08:00 to 12:00 for mainline flushing.".to_string(),
            audience: Audience::AllHomeowners,
        },
        now,
    )?;
    let notice = board.publish(&notice.id, now)?;
    println!("- Published '{}' to {}", notice.title, notice.audience.label());

    println!("\nOffice snapshot");
    let payments = billing_desk.list_payments(None)?;
    let complaint_queue = helpdesk.list_complaints(None)?;
    let request_queue = helpdesk.list_service_requests(None)?;
    let inquiry_queue = helpdesk.list_inquiries(None)?;
    let tour_list = tour_desk.list(None)?;
    let property_list = directory.list_properties()?;

    let report = OfficeReport::build(
        &ReportInputs {
            billing: &ledger,
            transactions: &payments,
            complaints: &complaint_queue,
            service_requests: &request_queue,
            inquiries: &inquiry_queue,
            tours: &tour_list,
            properties: &property_list,
        },
        as_of,
    );
    println!(
        "- Collections: {} billed, {} received, {} outstanding ({:.1}% collected)",
        report.collections.total_billed,
        report.collections.total_collected,
        report.collections.outstanding,
        report.collections.collection_rate
    );
    println!("- Complaint queue:");
    for tally in &report.complaint_tallies {
        println!("  - {}: {}", tally.status, tally.count);
    }
    println!("- Tour pipeline (non-empty stages):");
    for tally in report.tour_pipeline.iter().filter(|tally| tally.count > 0) {
        println!("  - {}: {}", tally.status, tally.count);
    }
    println!("- Occupancy:");
    for entry in &report.occupancy {
        println!(
            "  - {}: {}/{} taken, {} open",
            entry.phase, entry.sold_or_leased, entry.total, entry.available
        );
    }
    println!("- Collection health: {}", report.insights.collection_band.label());
    for note in &report.insights.observations {
        println!("  - {}", note);
    }

    let events = broadcast.events();
    println!("\nRealtime relay captured {} event(s)", events.len());
    for event in &events {
        println!("- [{}] {}", event.channel, event.event_type);
    }

    let contract_list = directory.list_contracts(None)?;
    let homeowner_list = directory.list_homeowners(None)?;
    let csv = export::collections_csv(&ledger, &contract_list, &homeowner_list)?;
    println!("\nCollections export");
    print!("{csv}");

    Ok(())
}
