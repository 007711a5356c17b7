use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::office::broadcast::BroadcastPublisher;
use crate::office::envelope;
use crate::office::store::StoreError;

use super::domain::{AnnouncementId, AnnouncementStatus, AnnouncementUpdate, NewAnnouncement};
use super::repository::AnnouncementRepository;
use super::service::{AnnouncementError, AnnouncementService};

/// Router exposing the announcement board endpoints.
pub fn announcements_router<R, P>(service: Arc<AnnouncementService<R, P>>) -> Router
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    Router::new()
        .route(
            "/api/homeowner-announcements",
            get(list_announcements::<R, P>).post(draft_announcement::<R, P>),
        )
        .route(
            "/api/homeowner-announcements/:id",
            put(edit_announcement::<R, P>).delete(delete_announcement::<R, P>),
        )
        .route(
            "/api/homeowner-announcements/:id/publish",
            post(publish_announcement::<R, P>),
        )
        .with_state(service)
}

fn error_response(error: AnnouncementError) -> Response {
    let status = match &error {
        AnnouncementError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnnouncementError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnnouncementError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        AnnouncementError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        AnnouncementError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(envelope::failure(error))).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardQuery {
    status: Option<String>,
}

pub(crate) async fn list_announcements<R, P>(
    State(service): State<Arc<AnnouncementService<R, P>>>,
    Query(query): Query<BoardQuery>,
) -> Response
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match AnnouncementStatus::parse(raw) {
            Some(status) => Some(status),
            None => return error_response(AnnouncementError::UnknownStatus(raw.to_string())),
        },
    };
    match service.list(status) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn draft_announcement<R, P>(
    State(service): State<Arc<AnnouncementService<R, P>>>,
    axum::Json(form): axum::Json<NewAnnouncement>,
) -> Response
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.draft(form, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_announcement<R, P>(
    State(service): State<Arc<AnnouncementService<R, P>>>,
    Path(id): Path<String>,
    axum::Json(update): axum::Json<AnnouncementUpdate>,
) -> Response
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.edit(&AnnouncementId(id), update, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn publish_announcement<R, P>(
    State(service): State<Arc<AnnouncementService<R, P>>>,
    Path(id): Path<String>,
) -> Response
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.publish(&AnnouncementId(id), Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_announcement<R, P>(
    State(service): State<Arc<AnnouncementService<R, P>>>,
    Path(id): Path<String>,
) -> Response
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let id = AnnouncementId(id);
    match service.delete(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
