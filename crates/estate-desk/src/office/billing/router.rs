use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::office::broadcast::BroadcastPublisher;
use crate::office::directory::ContractId;
use crate::office::envelope;
use crate::office::store::StoreError;

use super::domain::{
    BillingId, BillingRecord, BillingStatus, NewBillingRecord, NewPayment, TransactionId,
};
use super::repository::{BillingRepository, TransactionRepository};
use super::service::{BillingDeskService, BillingError, BillingFilter};

/// Router exposing the billing and transactions screens' endpoints.
pub fn billing_router<B, T, P>(service: Arc<BillingDeskService<B, T, P>>) -> Router
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    Router::new()
        .route(
            "/api/billing",
            get(list_charges::<B, T, P>).post(create_charge::<B, T, P>),
        )
        .route(
            "/api/billing/:id",
            put(update_charge::<B, T, P>).delete(delete_charge::<B, T, P>),
        )
        .route(
            "/api/transactions",
            get(list_payments::<B, T, P>).post(record_payment::<B, T, P>),
        )
        .route("/api/transactions/:id/receipt", get(payment_receipt::<B, T, P>))
        .with_state(service)
}

fn error_response(error: BillingError) -> Response {
    let status = match &error {
        BillingError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BillingError::NonPositiveAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BillingError::UnknownStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BillingError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        BillingError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        BillingError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(envelope::failure(error))).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChargeListQuery {
    contract_id: Option<String>,
    status: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentListQuery {
    contract_id: Option<String>,
}

pub(crate) async fn list_charges<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    Query(query): Query<ChargeListQuery>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match BillingStatus::parse(raw) {
            Some(status) => Some(status),
            None => return error_response(BillingError::UnknownStatus(raw.to_string())),
        },
    };
    let filter = BillingFilter {
        contract_id: query.contract_id.map(ContractId),
        status,
        search: query.search,
    };
    match service.list_charges(&filter) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_charge<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    axum::Json(form): axum::Json<NewBillingRecord>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.create_charge(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_charge<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    Path(id): Path<String>,
    axum::Json(record): axum::Json<BillingRecord>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.update_charge(&BillingId(id), record) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_charge<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    Path(id): Path<String>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let id = BillingId(id);
    match service.delete_charge(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_payments<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    Query(query): Query<PaymentListQuery>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    let contract_id = query.contract_id.map(ContractId);
    match service.list_payments(contract_id.as_ref()) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_payment<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    axum::Json(form): axum::Json<NewPayment>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.record_payment(form, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn payment_receipt<B, T, P>(
    State(service): State<Arc<BillingDeskService<B, T, P>>>,
    Path(id): Path<String>,
) -> Response
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    match service.receipt_html(&TransactionId(id)) {
        Ok(html) => Html(html).into_response(),
        Err(error) => error_response(error),
    }
}
