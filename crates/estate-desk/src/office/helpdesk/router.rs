use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::office::broadcast::BroadcastPublisher;
use crate::office::envelope;
use crate::office::store::StoreError;

use super::domain::{
    ComplaintId, ComplaintStatus, InquiryId, InquiryStatus, NewComplaint, NewInquiry,
    NewServiceRequest, ServiceRequestId, ServiceRequestStatus,
};
use super::repository::{ComplaintRepository, InquiryRepository, ServiceRequestRepository};
use super::service::{HelpdeskError, HelpdeskService};

/// Router exposing the helpdesk screens' endpoints.
pub fn helpdesk_router<C, S, I, P>(service: Arc<HelpdeskService<C, S, I, P>>) -> Router
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    Router::new()
        .route(
            "/api/complaints",
            get(list_complaints::<C, S, I, P>).post(file_complaint::<C, S, I, P>),
        )
        .route(
            "/api/complaints/:id",
            patch(patch_complaint::<C, S, I, P>).delete(delete_complaint::<C, S, I, P>),
        )
        .route(
            "/api/service-requests",
            get(list_service_requests::<C, S, I, P>).post(file_service_request::<C, S, I, P>),
        )
        .route(
            "/api/service-requests/:id",
            patch(patch_service_request::<C, S, I, P>).delete(delete_service_request::<C, S, I, P>),
        )
        .route(
            "/api/client-inquiries",
            get(list_inquiries::<C, S, I, P>).post(receive_inquiry::<C, S, I, P>),
        )
        .route(
            "/api/client-inquiries/:id",
            patch(patch_inquiry::<C, S, I, P>),
        )
        .with_state(service)
}

fn error_response(error: HelpdeskError) -> Response {
    let status = match &error {
        HelpdeskError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        HelpdeskError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        HelpdeskError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        HelpdeskError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        HelpdeskError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(envelope::failure(error))).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusPatch {
    pub(crate) status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceRequestPatch {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) scheduled_for: Option<NaiveDate>,
}

pub(crate) async fn list_complaints<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match ComplaintStatus::parse(raw) {
            Some(status) => Some(status),
            None => return error_response(HelpdeskError::UnknownStatus(raw.to_string())),
        },
    };
    match service.list_complaints(status) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn file_complaint<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    axum::Json(form): axum::Json<NewComplaint>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.file_complaint(form, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn patch_complaint<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Path(id): Path<String>,
    axum::Json(patch): axum::Json<StatusPatch>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.set_complaint_status(&ComplaintId(id), &patch.status, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_complaint<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Path(id): Path<String>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let id = ComplaintId(id);
    match service.delete_complaint(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_service_requests<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match ServiceRequestStatus::parse(raw) {
            Some(status) => Some(status),
            None => return error_response(HelpdeskError::UnknownStatus(raw.to_string())),
        },
    };
    match service.list_service_requests(status) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn file_service_request<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    axum::Json(form): axum::Json<NewServiceRequest>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.file_service_request(form, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn patch_service_request<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Path(id): Path<String>,
    axum::Json(patch): axum::Json<ServiceRequestPatch>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.update_service_request(
        &ServiceRequestId(id),
        &patch.status,
        patch.scheduled_for,
        Utc::now(),
    ) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_service_request<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Path(id): Path<String>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let id = ServiceRequestId(id);
    match service.delete_service_request(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_inquiries<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match InquiryStatus::parse(raw) {
            Some(status) => Some(status),
            None => return error_response(HelpdeskError::UnknownStatus(raw.to_string())),
        },
    };
    match service.list_inquiries(status) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn receive_inquiry<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    axum::Json(form): axum::Json<NewInquiry>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.receive_inquiry(form, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn patch_inquiry<C, S, I, P>(
    State(service): State<Arc<HelpdeskService<C, S, I, P>>>,
    Path(id): Path<String>,
    axum::Json(patch): axum::Json<StatusPatch>,
) -> Response
where
    C: ComplaintRepository + 'static,
    S: ServiceRequestRepository + 'static,
    I: InquiryRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.set_inquiry_status(&InquiryId(id), &patch.status, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}
