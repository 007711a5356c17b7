//! Shared record-store error surface.
//!
//! Every repository trait in the office speaks this enum so services and
//! routers can map outcomes to envelope responses uniformly. The store
//! itself offers no transactions or version checks: updates overwrite whole
//! records and concurrent edits race, last write wins.

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
