use crate::office::store::StoreError;

use super::domain::{Announcement, AnnouncementId};

/// Persistence seam for the announcement board.
pub trait AnnouncementRepository: Send + Sync {
    fn insert(&self, record: Announcement) -> Result<Announcement, StoreError>;
    fn update(&self, record: Announcement) -> Result<(), StoreError>;
    fn delete(&self, id: &AnnouncementId) -> Result<(), StoreError>;
    fn fetch(&self, id: &AnnouncementId) -> Result<Option<Announcement>, StoreError>;
    fn list(&self) -> Result<Vec<Announcement>, StoreError>;
}
