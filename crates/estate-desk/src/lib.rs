//! Core library for the estate back office: directory records, dues and
//! payments, helpdesk queues, tour-appointment approvals, announcements,
//! and operational reporting.
//!
//! The deployable HTTP binary lives in `services/api`; this crate holds the
//! domain types, repository and broadcast traits, services, and per-domain
//! routers it composes.

pub mod config;
pub mod error;
pub mod office;
pub mod telemetry;
