//! Tour appointments and the two-stage staff approval chain.
//!
//! A booking starts `pending`, is screened by customer service, then by
//! sales: `pending -> cs_approved -> sales_approved | rejected`. Rejection is
//! terminal. The administrative states (`confirmed`, `cancelled`,
//! `completed`, `no_show`) are reachable only through the admin status
//! override, which validates enum membership and nothing else: direct
//! status edits, last write wins. The role gate is enforced in the
//! service, not left to the caller.

pub mod approval;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use approval::{ApprovalError, ReviewAction, ReviewStage};
pub use domain::{AppointmentStatus, StaffRole, TourAppointment, TourId, TourRequest};
pub use repository::TourRepository;
pub use router::tours_router;
pub use service::{TourDeskError, TourDeskService};
