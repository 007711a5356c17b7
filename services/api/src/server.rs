use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAnnouncementRepository, InMemoryBillingRepository,
    InMemoryBroadcastPublisher, InMemoryComplaintRepository, InMemoryContractRepository,
    InMemoryHomeownerRepository, InMemoryInquiryRepository, InMemoryPropertyRepository,
    InMemoryPropertyTypeRepository, InMemoryServiceRequestRepository, InMemoryTourRepository,
    InMemoryTransactionRepository, ReportSources,
};
use crate::routes::with_office_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_desk::config::AppConfig;
use estate_desk::error::AppError;
use estate_desk::office::announcements::{announcements_router, AnnouncementService};
use estate_desk::office::billing::{billing_router, BillingDeskService};
use estate_desk::office::directory::{directory_router, DirectoryService};
use estate_desk::office::helpdesk::{helpdesk_router, HelpdeskService};
use estate_desk::office::tours::{tours_router, TourDeskService};
use estate_desk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let property_types = Arc::new(InMemoryPropertyTypeRepository::default());
    let properties = Arc::new(InMemoryPropertyRepository::default());
    let homeowners = Arc::new(InMemoryHomeownerRepository::default());
    let contracts = Arc::new(InMemoryContractRepository::default());
    let billing = Arc::new(InMemoryBillingRepository::default());
    let transactions = Arc::new(InMemoryTransactionRepository::default());
    let complaints = Arc::new(InMemoryComplaintRepository::default());
    let service_requests = Arc::new(InMemoryServiceRequestRepository::default());
    let inquiries = Arc::new(InMemoryInquiryRepository::default());
    let tours = Arc::new(InMemoryTourRepository::default());
    let announcements = Arc::new(InMemoryAnnouncementRepository::default());
    let broadcast = Arc::new(InMemoryBroadcastPublisher::default());

    let directory = Arc::new(DirectoryService::new(
        property_types,
        properties.clone(),
        homeowners.clone(),
        contracts.clone(),
    ));
    let billing_desk = Arc::new(BillingDeskService::new(
        billing.clone(),
        transactions.clone(),
        broadcast.clone(),
        config.office.clone(),
    ));
    let tour_desk = Arc::new(TourDeskService::new(tours.clone(), broadcast.clone()));
    let helpdesk = Arc::new(HelpdeskService::new(
        complaints.clone(),
        service_requests.clone(),
        inquiries.clone(),
        broadcast.clone(),
    ));
    let board = Arc::new(AnnouncementService::new(announcements, broadcast));

    let sources = ReportSources {
        billing,
        transactions,
        complaints,
        service_requests,
        inquiries,
        tours,
        properties,
        contracts,
        homeowners,
    };

    let desk = directory_router(directory)
        .merge(billing_router(billing_desk))
        .merge(tours_router(tour_desk))
        .merge(helpdesk_router(helpdesk))
        .merge(announcements_router(board));
    let app = with_office_routes(desk)
        .layer(Extension(app_state))
        .layer(Extension(sources))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "estate back office ready");

    axum::serve(listener, app).await?;
    Ok(())
}
