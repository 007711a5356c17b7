use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::office::broadcast::{BroadcastError, BroadcastEvent, BroadcastPublisher};
use crate::office::directory::PropertyId;
use crate::office::store::StoreError;
use crate::office::tours::domain::{TourAppointment, TourId, TourRequest};
use crate::office::tours::repository::TourRepository;
use crate::office::tours::{tours_router, TourDeskService};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).single().expect("valid clock")
}

pub(super) fn slot_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date")
}

pub(super) fn booking() -> TourRequest {
    TourRequest {
        property_id: PropertyId("prop-000014".to_string()),
        client_name: "Lucia Mercado".to_string(),
        email: "lucia.mercado@example.com".to_string(),
        phone: "0917-555-0144".to_string(),
        scheduled_for: slot_date(),
        time_slot: "10:00-11:00".to_string(),
    }
}

pub(super) fn build_desk() -> (
    TourDeskService<MemoryTours, MemoryBroadcast>,
    Arc<MemoryTours>,
    Arc<MemoryBroadcast>,
) {
    let repository = Arc::new(MemoryTours::default());
    let broadcast = Arc::new(MemoryBroadcast::default());
    let service = TourDeskService::new(repository.clone(), broadcast.clone());
    (service, repository, broadcast)
}

#[derive(Default, Clone)]
pub(super) struct MemoryTours {
    pub(super) records: Arc<Mutex<HashMap<TourId, TourAppointment>>>,
}

impl TourRepository for MemoryTours {
    fn insert(&self, record: TourAppointment) -> Result<TourAppointment, StoreError> {
        let mut guard = self.records.lock().expect("tour mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: TourAppointment) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("tour mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &TourId) -> Result<Option<TourAppointment>, StoreError> {
        let guard = self.records.lock().expect("tour mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<TourAppointment>, StoreError> {
        let guard = self.records.lock().expect("tour mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBroadcast {
    events: Arc<Mutex<Vec<BroadcastEvent>>>,
}

impl MemoryBroadcast {
    pub(super) fn events(&self) -> Vec<BroadcastEvent> {
        self.events.lock().expect("broadcast mutex poisoned").clone()
    }
}

impl BroadcastPublisher for MemoryBroadcast {
    fn publish(&self, event: BroadcastEvent) -> Result<(), BroadcastError> {
        self.events
            .lock()
            .expect("broadcast mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct FailingBroadcast;

impl BroadcastPublisher for FailingBroadcast {
    fn publish(&self, _event: BroadcastEvent) -> Result<(), BroadcastError> {
        Err(BroadcastError::Transport("channel offline".to_string()))
    }
}

pub(super) struct UnavailableTours;

impl TourRepository for UnavailableTours {
    fn insert(&self, _record: TourAppointment) -> Result<TourAppointment, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    fn update(&self, _record: TourAppointment) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    fn fetch(&self, _id: &TourId) -> Result<Option<TourAppointment>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    fn list(&self) -> Result<Vec<TourAppointment>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn tours_router_with_service(
    service: TourDeskService<MemoryTours, MemoryBroadcast>,
) -> axum::Router {
    tours_router(Arc::new(service))
}
