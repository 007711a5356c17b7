use crate::office::store::StoreError;

use super::domain::{TourAppointment, TourId};

/// Storage abstraction for tour appointments. `update` overwrites the whole
/// record; there is no version check, so concurrent reviewers race and the
/// last write wins.
pub trait TourRepository: Send + Sync {
    fn insert(&self, record: TourAppointment) -> Result<TourAppointment, StoreError>;
    fn update(&self, record: TourAppointment) -> Result<(), StoreError>;
    fn fetch(&self, id: &TourId) -> Result<Option<TourAppointment>, StoreError>;
    fn list(&self) -> Result<Vec<TourAppointment>, StoreError>;
}
