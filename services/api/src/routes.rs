use crate::infra::{deserialize_optional_date, AppState, ReportSources};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use estate_desk::error::AppError;
use estate_desk::office::billing::{BillingRepository, TransactionRepository};
use estate_desk::office::directory::{ContractRepository, HomeownerRepository, PropertyRepository};
use estate_desk::office::helpdesk::{
    ComplaintRepository, InquiryRepository, ServiceRequestRepository,
};
use estate_desk::office::reporting::{export, OfficeReport, ReportInputs};
use estate_desk::office::tours::TourRepository;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct OfficeReportRequest {
    /// Reporting date; defaults to today when omitted.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

/// Attach the operational and reporting endpoints to the composed desk
/// router. The per-domain REST surfaces are merged by the server before
/// this runs.
pub(crate) fn with_office_routes(desk: axum::Router) -> axum::Router {
    desk.route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/reports/office",
            axum::routing::post(office_report_endpoint),
        )
        .route(
            "/api/reports/collections.csv",
            axum::routing::get(collections_export_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn office_report_endpoint(
    Extension(sources): Extension<ReportSources>,
    Json(payload): Json<OfficeReportRequest>,
) -> Result<Json<OfficeReport>, AppError> {
    let as_of = payload.as_of.unwrap_or_else(|| Local::now().date_naive());

    let billing = sources.billing.list()?;
    let transactions = sources.transactions.list()?;
    let complaints = sources.complaints.list()?;
    let service_requests = sources.service_requests.list()?;
    let inquiries = sources.inquiries.list()?;
    let tours = sources.tours.list()?;
    let properties = sources.properties.list()?;

    let report = OfficeReport::build(
        &ReportInputs {
            billing: &billing,
            transactions: &transactions,
            complaints: &complaints,
            service_requests: &service_requests,
            inquiries: &inquiries,
            tours: &tours,
            properties: &properties,
        },
        as_of,
    );

    Ok(Json(report))
}

pub(crate) async fn collections_export_endpoint(
    Extension(sources): Extension<ReportSources>,
) -> Result<impl IntoResponse, AppError> {
    let billing = sources.billing.list()?;
    let contracts = sources.contracts.list()?;
    let homeowners = sources.homeowners.list()?;

    let body = export::collections_csv(&billing, &contracts, &homeowners)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"collections.csv\"",
            ),
        ],
        body,
    ))
}
