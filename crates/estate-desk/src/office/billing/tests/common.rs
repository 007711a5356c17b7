use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::config::OfficeConfig;
use crate::office::billing::domain::{
    BillingId, BillingRecord, NewBillingRecord, NewPayment, PaymentMethod, PaymentTransaction,
    TransactionId,
};
use crate::office::billing::repository::{BillingRepository, TransactionRepository};
use crate::office::billing::{billing_router, BillingDeskService};
use crate::office::broadcast::{BroadcastError, BroadcastEvent, BroadcastPublisher};
use crate::office::directory::ContractId;
use crate::office::store::StoreError;

pub(super) fn office() -> OfficeConfig {
    OfficeConfig {
        org_name: "Vista Verde Estates".to_string(),
        receipt_footer: "Keep this copy for your records.".to_string(),
    }
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 2, 9, 30, 0).single().expect("valid clock")
}

pub(super) fn charge_form() -> NewBillingRecord {
    NewBillingRecord {
        contract_id: ContractId("ct-000004".to_string()),
        period: "2025-04".to_string(),
        description: "Monthly association dues".to_string(),
        amount_due: 1180,
        due_date: NaiveDate::from_ymd_opt(2025, 4, 15).expect("valid date"),
    }
}

pub(super) fn payment_form(billing_id: BillingId, amount: i64) -> NewPayment {
    NewPayment {
        billing_id,
        payer_name: "Lucia Mercado".to_string(),
        amount,
        method: PaymentMethod::Cash,
        reference_no: None,
        received_by: "A. Santos".to_string(),
    }
}

pub(super) fn build_desk() -> (
    BillingDeskService<MemoryBilling, MemoryTransactions, MemoryBroadcast>,
    Arc<MemoryBilling>,
    Arc<MemoryTransactions>,
    Arc<MemoryBroadcast>,
) {
    let billing = Arc::new(MemoryBilling::default());
    let transactions = Arc::new(MemoryTransactions::default());
    let broadcast = Arc::new(MemoryBroadcast::default());
    let service = BillingDeskService::new(
        billing.clone(),
        transactions.clone(),
        broadcast.clone(),
        office(),
    );
    (service, billing, transactions, broadcast)
}

#[derive(Default, Clone)]
pub(super) struct MemoryBilling {
    pub(super) records: Arc<Mutex<HashMap<BillingId, BillingRecord>>>,
}

impl BillingRepository for MemoryBilling {
    fn insert(&self, record: BillingRecord) -> Result<BillingRecord, StoreError> {
        let mut guard = self.records.lock().expect("billing mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: BillingRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("billing mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn delete(&self, id: &BillingId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("billing mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, StoreError> {
        let guard = self.records.lock().expect("billing mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<BillingRecord>, StoreError> {
        let guard = self.records.lock().expect("billing mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Billing store that counts delete calls.
#[derive(Default)]
pub(super) struct CountingBilling {
    inner: MemoryBilling,
    deletes: AtomicUsize,
}

impl CountingBilling {
    pub(super) fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl BillingRepository for CountingBilling {
    fn insert(&self, record: BillingRecord) -> Result<BillingRecord, StoreError> {
        self.inner.insert(record)
    }

    fn update(&self, record: BillingRecord) -> Result<(), StoreError> {
        self.inner.update(record)
    }

    fn delete(&self, id: &BillingId) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id)
    }

    fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, StoreError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<BillingRecord>, StoreError> {
        self.inner.list()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryTransactions {
    pub(super) records: Arc<Mutex<HashMap<TransactionId, PaymentTransaction>>>,
}

impl TransactionRepository for MemoryTransactions {
    fn insert(&self, record: PaymentTransaction) -> Result<PaymentTransaction, StoreError> {
        let mut guard = self.records.lock().expect("transaction mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &TransactionId) -> Result<Option<PaymentTransaction>, StoreError> {
        let guard = self.records.lock().expect("transaction mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PaymentTransaction>, StoreError> {
        let guard = self.records.lock().expect("transaction mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryBroadcast {
    events: Arc<Mutex<Vec<BroadcastEvent>>>,
}

impl MemoryBroadcast {
    pub(super) fn events(&self) -> Vec<BroadcastEvent> {
        self.events.lock().expect("broadcast mutex poisoned").clone()
    }
}

impl BroadcastPublisher for MemoryBroadcast {
    fn publish(&self, event: BroadcastEvent) -> Result<(), BroadcastError> {
        self.events
            .lock()
            .expect("broadcast mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}

pub(super) fn billing_router_with_service(
    service: BillingDeskService<MemoryBilling, MemoryTransactions, MemoryBroadcast>,
) -> axum::Router {
    billing_router(Arc::new(service))
}
