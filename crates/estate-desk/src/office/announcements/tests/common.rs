use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::office::announcements::domain::{
    Announcement, AnnouncementId, Audience, NewAnnouncement,
};
use crate::office::announcements::repository::AnnouncementRepository;
use crate::office::announcements::{announcements_router, AnnouncementService};
use crate::office::broadcast::{BroadcastError, BroadcastEvent, BroadcastPublisher};
use crate::office::store::StoreError;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).single().expect("valid clock")
}

pub(super) fn draft_form() -> NewAnnouncement {
    NewAnnouncement {
        title: "Water interruption on Saturday".to_string(),
        body: "Mainline flushing from 8am to 12nn. Please store water ahead.".to_string(),
        audience: Audience::AllHomeowners,
    }
}

pub(super) type Desk = AnnouncementService<MemoryAnnouncements, MemoryBroadcast>;

pub(super) fn build_desk() -> (Desk, Arc<MemoryAnnouncements>, Arc<MemoryBroadcast>) {
    let announcements = Arc::new(MemoryAnnouncements::default());
    let broadcast = Arc::new(MemoryBroadcast::default());
    let service = AnnouncementService::new(announcements.clone(), broadcast.clone());
    (service, announcements, broadcast)
}

#[derive(Default, Clone)]
pub(super) struct MemoryAnnouncements {
    pub(super) records: Arc<Mutex<HashMap<AnnouncementId, Announcement>>>,
}

impl AnnouncementRepository for MemoryAnnouncements {
    fn insert(&self, record: Announcement) -> Result<Announcement, StoreError> {
        let mut guard = self.records.lock().expect("announcement mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: Announcement) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("announcement mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn delete(&self, id: &AnnouncementId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("announcement mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, id: &AnnouncementId) -> Result<Option<Announcement>, StoreError> {
        let guard = self.records.lock().expect("announcement mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Announcement>, StoreError> {
        let guard = self.records.lock().expect("announcement mutex poisoned");
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

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn announcements_router_with_service(service: Desk) -> axum::Router {
    announcements_router(Arc::new(service))
}
