use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::office::broadcast::{BroadcastEvent, BroadcastPublisher};
use crate::office::store::StoreError;

use super::domain::{
    Announcement, AnnouncementId, AnnouncementStatus, AnnouncementUpdate, NewAnnouncement,
};
use super::repository::AnnouncementRepository;

/// Realtime channel for board updates.
const ANNOUNCEMENTS_CHANNEL: &str = "announcements";

/// Error raised by the announcement desk.
#[derive(Debug, thiserror::Error)]
pub enum AnnouncementError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

static ANNOUNCEMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_announcement_id() -> AnnouncementId {
    let id = ANNOUNCEMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnnouncementId(format!("ann-{id:06}"))
}

/// Service behind the homeowner announcement board.
pub struct AnnouncementService<R, P> {
    announcements: Arc<R>,
    broadcast: Arc<P>,
}

impl<R, P> AnnouncementService<R, P>
where
    R: AnnouncementRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    pub fn new(announcements: Arc<R>, broadcast: Arc<P>) -> Self {
        Self {
            announcements,
            broadcast,
        }
    }

    /// Draft a new announcement. It stays off the board until published.
    pub fn draft(
        &self,
        form: NewAnnouncement,
        now: DateTime<Utc>,
    ) -> Result<Announcement, AnnouncementError> {
        if form.title.trim().is_empty() {
            return Err(AnnouncementError::MissingField("title"));
        }
        if form.body.trim().is_empty() {
            return Err(AnnouncementError::MissingField("body"));
        }

        let record = Announcement {
            id: next_announcement_id(),
            title: form.title,
            body: form.body,
            audience: form.audience,
            status: AnnouncementStatus::Draft,
            created_at: now,
            updated_at: now,
            published_at: None,
        };
        let stored = self.announcements.insert(record)?;
        Ok(stored)
    }

    pub fn list(
        &self,
        status: Option<AnnouncementStatus>,
    ) -> Result<Vec<Announcement>, AnnouncementError> {
        let mut records = self.announcements.list()?;
        if let Some(wanted) = status {
            records.retain(|record| record.status == wanted);
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    /// Replace the editable fields. Status and publication time survive the
    /// edit; a published notice stays published with its original stamp.
    pub fn edit(
        &self,
        id: &AnnouncementId,
        update: AnnouncementUpdate,
        now: DateTime<Utc>,
    ) -> Result<Announcement, AnnouncementError> {
        if update.title.trim().is_empty() {
            return Err(AnnouncementError::MissingField("title"));
        }
        if update.body.trim().is_empty() {
            return Err(AnnouncementError::MissingField("body"));
        }

        let mut record = self.announcements.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.title = update.title;
        record.body = update.body;
        record.audience = update.audience;
        record.updated_at = now;
        self.announcements.update(record.clone())?;
        Ok(record)
    }

    /// Put the announcement on the board. Publishing again refreshes the
    /// publication stamp and relays the notice once more.
    pub fn publish(
        &self,
        id: &AnnouncementId,
        now: DateTime<Utc>,
    ) -> Result<Announcement, AnnouncementError> {
        let mut record = self.announcements.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.status = AnnouncementStatus::Published;
        record.published_at = Some(now);
        record.updated_at = now;
        self.announcements.update(record.clone())?;

        let event = BroadcastEvent::new(
            ANNOUNCEMENTS_CHANNEL,
            "announcement_published",
            json!({
                "id": record.id.0,
                "title": record.title,
                "audience": record.audience.label(),
            }),
        );
        let _ = self.broadcast.publish(event);

        Ok(record)
    }

    pub fn delete(&self, id: &AnnouncementId) -> Result<(), AnnouncementError> {
        self.announcements.delete(id)?;
        Ok(())
    }

    pub fn get(&self, id: &AnnouncementId) -> Result<Announcement, AnnouncementError> {
        let record = self.announcements.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}
