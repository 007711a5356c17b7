//! Dues and charges per contract, payments against them, and the printable
//! receipt. A charge starts `unpaid` with its balance equal to the amount
//! due; recorded payments reduce the balance and move the status to
//! `partially_paid` or `paid`. `overdue` is a manual reassignment done from
//! the billing screen, the same as any other status edit.

pub mod domain;
pub mod receipt;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BillingId, BillingRecord, BillingStatus, NewBillingRecord, NewPayment, PaymentMethod,
    PaymentTransaction, TransactionId,
};
pub use receipt::{amount_in_words, render_receipt_html, ReceiptContext};
pub use repository::{BillingRepository, TransactionRepository};
pub use router::billing_router;
pub use service::{BillingDeskService, BillingError, BillingFilter};
