use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::office::broadcast::BroadcastPublisher;
use crate::office::envelope;
use crate::office::store::StoreError;

use super::approval::{ApprovalError, ReviewAction};
use super::domain::{AppointmentStatus, StaffRole, TourId, TourRequest};
use super::repository::TourRepository;
use super::service::{TourDeskError, TourDeskService};

/// Header carrying the acting staff member's role. Review and override
/// endpoints refuse requests without a recognized value; the check lives
/// here on the server, not in the caller.
pub const ROLE_HEADER: &str = "x-staff-role";

/// Router exposing the booking form and the review chain.
pub fn tours_router<R, B>(service: Arc<TourDeskService<R, B>>) -> Router
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    Router::new()
        .route(
            "/api/book-tour",
            get(list_tours::<R, B>).post(book_tour::<R, B>),
        )
        .route("/api/book-tour/:id/approve", post(approve_tour::<R, B>))
        .route("/api/book-tour/:id/reject", post(reject_tour::<R, B>))
        .route("/api/book-tour/:id/status", patch(edit_tour_status::<R, B>))
        .with_state(service)
}

fn error_response(error: TourDeskError) -> Response {
    let status = match &error {
        TourDeskError::Approval(ApprovalError::EmptyReason) => StatusCode::UNPROCESSABLE_ENTITY,
        TourDeskError::Approval(ApprovalError::NotReviewable { .. }) => StatusCode::CONFLICT,
        TourDeskError::Approval(ApprovalError::RoleNotAllowed { .. }) => StatusCode::FORBIDDEN,
        TourDeskError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        TourDeskError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        TourDeskError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        TourDeskError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TourDeskError::NotAdmin(_) => StatusCode::FORBIDDEN,
        TourDeskError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TourDeskError::DateInPast(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, axum::Json(envelope::failure(error))).into_response()
}

fn actor_from_headers(headers: &HeaderMap) -> Result<StaffRole, Response> {
    let raw = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    StaffRole::parse(raw).ok_or_else(|| {
        (
            StatusCode::FORBIDDEN,
            axum::Json(envelope::failure(
                "x-staff-role header missing or not a recognized role",
            )),
        )
            .into_response()
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct TourListQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApproveForm {
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectForm {
    #[serde(default)]
    pub(crate) reason: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusForm {
    pub(crate) status: String,
}

pub(crate) async fn book_tour<R, B>(
    State(service): State<Arc<TourDeskService<R, B>>>,
    axum::Json(request): axum::Json<TourRequest>,
) -> Response
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    match service.book(request, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_tours<R, B>(
    State(service): State<Arc<TourDeskService<R, B>>>,
    Query(query): Query<TourListQuery>,
) -> Response
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match AppointmentStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(TourDeskError::UnknownStatus(raw.to_string()));
            }
        },
    };
    match service.list(status) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_tour<R, B>(
    State(service): State<Arc<TourDeskService<R, B>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(form): axum::Json<ApproveForm>,
) -> Response
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    let action = ReviewAction::Approve { notes: form.notes };
    match service.review(&TourId(id), actor, action, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_tour<R, B>(
    State(service): State<Arc<TourDeskService<R, B>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(form): axum::Json<RejectForm>,
) -> Response
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    let action = ReviewAction::Reject {
        reason: form.reason,
    };
    match service.review(&TourId(id), actor, action, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_tour_status<R, B>(
    State(service): State<Arc<TourDeskService<R, B>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(form): axum::Json<StatusForm>,
) -> Response
where
    R: TourRepository + 'static,
    B: BroadcastPublisher + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    match service.override_status(&TourId(id), actor, &form.status, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}
