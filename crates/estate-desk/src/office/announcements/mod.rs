//! Homeowner announcements. Drafted by staff, optionally edited, then
//! published: publishing stamps the publication time and relays the news to
//! open sessions so boards refresh without a reload.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Announcement, AnnouncementId, AnnouncementStatus, AnnouncementUpdate, Audience,
    NewAnnouncement,
};
pub use repository::AnnouncementRepository;
pub use router::announcements_router;
pub use service::{AnnouncementError, AnnouncementService};
