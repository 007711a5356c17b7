use crate::office::store::StoreError;

use super::domain::{BillingId, BillingRecord, PaymentTransaction, TransactionId};

/// Storage abstraction for charges. `update` overwrites whole records and
/// `delete` is a hard delete, as on the screens this replaces.
pub trait BillingRepository: Send + Sync {
    fn insert(&self, record: BillingRecord) -> Result<BillingRecord, StoreError>;
    fn update(&self, record: BillingRecord) -> Result<(), StoreError>;
    fn delete(&self, id: &BillingId) -> Result<(), StoreError>;
    fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, StoreError>;
    fn list(&self) -> Result<Vec<BillingRecord>, StoreError>;
}

/// Storage abstraction for payments. Payments are append-only; the office
/// corrects mistakes with an offsetting entry, never by editing history.
pub trait TransactionRepository: Send + Sync {
    fn insert(&self, record: PaymentTransaction) -> Result<PaymentTransaction, StoreError>;
    fn fetch(&self, id: &TransactionId) -> Result<Option<PaymentTransaction>, StoreError>;
    fn list(&self) -> Result<Vec<PaymentTransaction>, StoreError>;
}
