use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::office::directory::ContractId;

/// Identifier wrapper for billing records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingId(pub String);

/// Identifier wrapper for payment transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub String);

/// Collection state of a charge. `overdue` is set by hand from the billing
/// screen rather than computed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
    Overdue,
}

impl BillingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BillingStatus::Unpaid => "unpaid",
            BillingStatus::PartiallyPaid => "partially_paid",
            BillingStatus::Paid => "paid",
            BillingStatus::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "unpaid" => Some(Self::Unpaid),
            "partially_paid" => Some(Self::PartiallyPaid),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    /// A settled charge carries no balance.
    pub const fn is_settled(self) -> bool {
        matches!(self, BillingStatus::Paid)
    }
}

/// How a payment came in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    Online,
}

impl PaymentMethod {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Online => "online",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "cash" => Some(Self::Cash),
            "check" => Some(Self::Check),
            "bank_transfer" => Some(Self::BankTransfer),
            "online" => Some(Self::Online),
            _ => None,
        }
    }

    /// Display form used on the printed receipt.
    pub const fn display_name(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Check => "Check",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Online => "Online",
        }
    }
}

/// A charge billed against a contract. Amounts are whole pesos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: BillingId,
    pub contract_id: ContractId,
    pub period: String,
    pub description: String,
    pub amount_due: i64,
    pub due_date: NaiveDate,
    pub status: BillingStatus,
    pub balance: i64,
}

/// Form payload for a new charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBillingRecord {
    pub contract_id: ContractId,
    pub period: String,
    pub description: String,
    pub amount_due: i64,
    pub due_date: NaiveDate,
}

/// A payment applied to a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: TransactionId,
    pub billing_id: BillingId,
    pub contract_id: ContractId,
    pub payer_name: String,
    pub amount: i64,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub received_by: String,
}

/// Cashier form payload for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub billing_id: BillingId,
    pub payer_name: String,
    pub amount: i64,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    pub received_by: String,
}
