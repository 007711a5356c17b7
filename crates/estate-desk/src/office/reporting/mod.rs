//! Back-office snapshot over the record slices: collection figures, queue
//! tallies, tour pipeline, per-phase occupancy, and headline observations.
//! Pure computation, no I/O; the CSV export of the billing ledger lives in
//! [`export`].

mod insights;
mod summary;

pub mod export;

pub use insights::{CollectionBand, OfficeInsights};
pub use summary::{CollectionSummary, OccupancyEntry, OfficeReport, ReportInputs, StatusTally};
