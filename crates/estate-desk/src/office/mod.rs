//! Back-office domains and the shared plumbing they sit on.
//!
//! Each domain follows the same layering: flat record types in `domain`,
//! a record-store trait in `repository`, a service composing validation and
//! side effects, and an axum router exposing the REST surface. The managed
//! data store and the realtime relay are opaque collaborators reached only
//! through the traits defined here.

pub mod announcements;
pub mod billing;
pub mod broadcast;
pub mod directory;
pub mod envelope;
pub mod helpdesk;
pub mod reporting;
pub mod store;
pub mod tours;
