use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;

use crate::office::envelope;
use crate::office::store::StoreError;

use super::domain::{
    ContractId, Homeowner, HomeownerId, NewContract, NewHomeowner, NewProperty, NewPropertyType,
    Property, PropertyId, PropertyTypeId, PropertyTypeUpdate,
};
use super::repository::{
    ContractRepository, HomeownerRepository, PropertyRepository, PropertyTypeRepository,
};
use super::service::{DirectoryError, DirectoryService};

/// Router exposing the directory screens' endpoints.
pub fn directory_router<PT, P, H, C>(service: Arc<DirectoryService<PT, P, H, C>>) -> Router
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    Router::new()
        .route(
            "/api/property-types",
            get(list_property_types::<PT, P, H, C>).post(create_property_type::<PT, P, H, C>),
        )
        .route(
            "/api/property-types/:id",
            put(update_property_type::<PT, P, H, C>).delete(delete_property_type::<PT, P, H, C>),
        )
        .route(
            "/api/properties",
            get(list_properties::<PT, P, H, C>).post(create_property::<PT, P, H, C>),
        )
        .route(
            "/api/properties/:id",
            put(update_property::<PT, P, H, C>).delete(delete_property::<PT, P, H, C>),
        )
        .route(
            "/api/homeowners",
            get(list_homeowners::<PT, P, H, C>).post(create_homeowner::<PT, P, H, C>),
        )
        .route(
            "/api/homeowners/:id",
            put(update_homeowner::<PT, P, H, C>).delete(delete_homeowner::<PT, P, H, C>),
        )
        .route(
            "/api/contracts",
            get(list_contracts::<PT, P, H, C>).post(create_contract::<PT, P, H, C>),
        )
        .route("/api/contracts/:id", get(get_contract::<PT, P, H, C>))
        .with_state(service)
}

fn error_response(error: DirectoryError) -> Response {
    let status = match &error {
        DirectoryError::DuplicateTypeName(_) => StatusCode::CONFLICT,
        DirectoryError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DirectoryError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        DirectoryError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        DirectoryError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(envelope::failure(error))).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct HomeownerListQuery {
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContractListQuery {
    homeowner_id: Option<String>,
}

pub(crate) async fn list_property_types<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.list_property_types() {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_property_type<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    axum::Json(form): axum::Json<NewPropertyType>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.create_property_type(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_property_type<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
    axum::Json(update): axum::Json<PropertyTypeUpdate>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.update_property_type(&PropertyTypeId(id), update) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_property_type<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    let id = PropertyTypeId(id);
    match service.delete_property_type(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_properties<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.list_properties() {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_property<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    axum::Json(form): axum::Json<NewProperty>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.create_property(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_property<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
    axum::Json(record): axum::Json<Property>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.update_property(&PropertyId(id), record) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_property<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    let id = PropertyId(id);
    match service.delete_property(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_homeowners<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Query(query): Query<HomeownerListQuery>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.list_homeowners(query.search.as_deref()) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_homeowner<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    axum::Json(form): axum::Json<NewHomeowner>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.create_homeowner(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_homeowner<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
    axum::Json(record): axum::Json<Homeowner>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.update_homeowner(&HomeownerId(id), record) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_homeowner<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    let id = HomeownerId(id);
    match service.delete_homeowner(&id) {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(envelope::success(serde_json::json!({ "id": id.0 }))),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_contracts<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Query(query): Query<ContractListQuery>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    let homeowner_id = query.homeowner_id.map(HomeownerId);
    match service.list_contracts(homeowner_id.as_ref()) {
        Ok(records) => (StatusCode::OK, axum::Json(envelope::success(records))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_contract<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    axum::Json(form): axum::Json<NewContract>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.create_contract(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_contract<PT, P, H, C>(
    State(service): State<Arc<DirectoryService<PT, P, H, C>>>,
    Path(id): Path<String>,
) -> Response
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    match service.get_contract(&ContractId(id)) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope::success(record))).into_response(),
        Err(error) => error_response(error),
    }
}
