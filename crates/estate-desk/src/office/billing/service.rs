use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::config::OfficeConfig;
use crate::office::broadcast::{BroadcastEvent, BroadcastPublisher};
use crate::office::directory::ContractId;
use crate::office::store::StoreError;

use super::domain::{
    BillingId, BillingRecord, BillingStatus, NewBillingRecord, NewPayment, PaymentTransaction,
    TransactionId,
};
use super::receipt::{render_receipt_html, ReceiptContext};
use super::repository::{BillingRepository, TransactionRepository};

/// Realtime channel for collection events.
const BILLING_CHANNEL: &str = "billing";

/// Error raised by the billing desk.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("payment amount must be positive, got {0}")]
    NonPositiveAmount(i64),
    #[error("unknown billing status '{0}'")]
    UnknownStatus(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory narrowing applied to the listed snapshot.
#[derive(Debug, Default, Clone)]
pub struct BillingFilter {
    pub contract_id: Option<ContractId>,
    pub status: Option<BillingStatus>,
    pub search: Option<String>,
}

static BILLING_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TRANSACTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_billing_id() -> BillingId {
    let id = BILLING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BillingId(format!("bill-{id:06}"))
}

fn next_transaction_id() -> TransactionId {
    let id = TRANSACTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TransactionId(format!("pay-{id:06}"))
}

/// Service behind the billing and transactions screens: charges, payments,
/// and the printable receipt.
pub struct BillingDeskService<B, T, P> {
    billing: Arc<B>,
    transactions: Arc<T>,
    broadcast: Arc<P>,
    office: OfficeConfig,
}

impl<B, T, P> BillingDeskService<B, T, P>
where
    B: BillingRepository + 'static,
    T: TransactionRepository + 'static,
    P: BroadcastPublisher + 'static,
{
    pub fn new(
        billing: Arc<B>,
        transactions: Arc<T>,
        broadcast: Arc<P>,
        office: OfficeConfig,
    ) -> Self {
        Self {
            billing,
            transactions,
            broadcast,
            office,
        }
    }

    /// Post a new charge. It starts `unpaid` with the full amount open.
    pub fn create_charge(&self, form: NewBillingRecord) -> Result<BillingRecord, BillingError> {
        if form.description.trim().is_empty() {
            return Err(BillingError::MissingField("description"));
        }
        if form.period.trim().is_empty() {
            return Err(BillingError::MissingField("period"));
        }
        if form.amount_due <= 0 {
            return Err(BillingError::NonPositiveAmount(form.amount_due));
        }

        let record = BillingRecord {
            id: next_billing_id(),
            contract_id: form.contract_id,
            period: form.period,
            description: form.description,
            amount_due: form.amount_due,
            due_date: form.due_date,
            status: BillingStatus::Unpaid,
            balance: form.amount_due,
        };
        let stored = self.billing.insert(record)?;
        Ok(stored)
    }

    /// Overwrite a charge with the edited record. The path id wins over
    /// whatever id the body carries.
    pub fn update_charge(
        &self,
        id: &BillingId,
        mut record: BillingRecord,
    ) -> Result<BillingRecord, BillingError> {
        self.billing.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.id = id.clone();
        self.billing.update(record.clone())?;
        Ok(record)
    }

    /// Hard delete. One repository call, no existence pre-check: the store
    /// reports a missing record itself.
    pub fn delete_charge(&self, id: &BillingId) -> Result<(), BillingError> {
        self.billing.delete(id)?;
        Ok(())
    }

    pub fn list_charges(&self, filter: &BillingFilter) -> Result<Vec<BillingRecord>, BillingError> {
        let mut records = self.billing.list()?;
        if let Some(contract_id) = &filter.contract_id {
            records.retain(|record| &record.contract_id == contract_id);
        }
        if let Some(status) = filter.status {
            records.retain(|record| record.status == status);
        }
        if let Some(needle) = filter.search.as_deref() {
            let needle = needle.trim().to_ascii_lowercase();
            if !needle.is_empty() {
                records.retain(|record| {
                    record.description.to_ascii_lowercase().contains(&needle)
                        || record.period.to_ascii_lowercase().contains(&needle)
                });
            }
        }
        records.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        Ok(records)
    }

    /// Record a payment against a charge: append the transaction, shrink
    /// the open balance, and move the status along. An overpayment settles
    /// the charge; the excess is handled at the counter, not here.
    pub fn record_payment(
        &self,
        form: NewPayment,
        now: DateTime<Utc>,
    ) -> Result<PaymentTransaction, BillingError> {
        if form.payer_name.trim().is_empty() {
            return Err(BillingError::MissingField("payer_name"));
        }
        if form.received_by.trim().is_empty() {
            return Err(BillingError::MissingField("received_by"));
        }
        if form.amount <= 0 {
            return Err(BillingError::NonPositiveAmount(form.amount));
        }

        let mut charge = self
            .billing
            .fetch(&form.billing_id)?
            .ok_or(StoreError::NotFound)?;

        let transaction = PaymentTransaction {
            id: next_transaction_id(),
            billing_id: charge.id.clone(),
            contract_id: charge.contract_id.clone(),
            payer_name: form.payer_name,
            amount: form.amount,
            method: form.method,
            reference_no: form.reference_no,
            paid_at: now,
            received_by: form.received_by,
        };
        let stored = self.transactions.insert(transaction)?;

        charge.balance = (charge.balance - stored.amount).max(0);
        charge.status = if charge.balance == 0 {
            BillingStatus::Paid
        } else {
            BillingStatus::PartiallyPaid
        };
        self.billing.update(charge.clone())?;

        let event = BroadcastEvent::new(
            BILLING_CHANNEL,
            "payment_recorded",
            json!({
                "transaction_id": stored.id.0,
                "billing_id": charge.id.0,
                "amount": stored.amount,
                "balance": charge.balance,
                "status": charge.status.label(),
            }),
        );
        let _ = self.broadcast.publish(event);

        Ok(stored)
    }

    pub fn list_payments(
        &self,
        contract_id: Option<&ContractId>,
    ) -> Result<Vec<PaymentTransaction>, BillingError> {
        let mut records = self.transactions.list()?;
        if let Some(contract_id) = contract_id {
            records.retain(|record| &record.contract_id == contract_id);
        }
        records.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(records)
    }

    pub fn get_payment(&self, id: &TransactionId) -> Result<PaymentTransaction, BillingError> {
        let record = self.transactions.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    /// Build the printable receipt for a recorded payment. The charge it
    /// settled must still exist; receipts for charges later hard-deleted
    /// come back not-found like any other missing record.
    pub fn receipt_html(&self, id: &TransactionId) -> Result<String, BillingError> {
        let transaction = self.transactions.fetch(id)?.ok_or(StoreError::NotFound)?;
        let charge = self
            .billing
            .fetch(&transaction.billing_id)?
            .ok_or(StoreError::NotFound)?;

        let context = ReceiptContext {
            org_name: self.office.org_name.clone(),
            footer: self.office.receipt_footer.clone(),
            receipt_no: transaction.id.0.clone(),
            payer_name: transaction.payer_name.clone(),
            contract_id: transaction.contract_id.0.clone(),
            period: charge.period.clone(),
            description: charge.description.clone(),
            amount: transaction.amount,
            method: transaction.method,
            reference_no: transaction.reference_no.clone(),
            paid_at: transaction.paid_at,
            received_by: transaction.received_by.clone(),
        };
        Ok(render_receipt_html(&context))
    }
}
