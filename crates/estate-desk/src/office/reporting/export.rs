//! CSV export of the billing ledger, one row per charge with the amount
//! paid and the remaining balance. Served as a download by the report
//! endpoint; the homeowner column is resolved through the contract and left
//! blank when the join finds nothing.

use std::collections::HashMap;

use crate::office::billing::BillingRecord;
use crate::office::directory::{Contract, Homeowner};

/// Error raised while rendering the export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv rendering failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output was not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render the collections ledger as CSV text, ordered by due date.
pub fn collections_csv(
    billing: &[BillingRecord],
    contracts: &[Contract],
    homeowners: &[Homeowner],
) -> Result<String, ExportError> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    for homeowner in homeowners {
        names.insert(homeowner.id.0.as_str(), homeowner.full_name.as_str());
    }
    let mut owner_of_contract: HashMap<&str, &str> = HashMap::new();
    for contract in contracts {
        if let Some(name) = names.get(contract.homeowner_id.0.as_str()) {
            owner_of_contract.insert(contract.id.0.as_str(), name);
        }
    }

    let mut rows: Vec<&BillingRecord> = billing.iter().collect();
    rows.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.id.0.cmp(&b.id.0))
    });

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "billing_id",
        "period",
        "contract",
        "homeowner",
        "amount_due",
        "paid",
        "balance",
        "status",
    ])?;

    for record in rows {
        let paid = record.amount_due - record.balance;
        let homeowner = owner_of_contract
            .get(record.contract_id.0.as_str())
            .copied()
            .unwrap_or("");
        writer.write_record([
            record.id.0.as_str(),
            record.period.as_str(),
            record.contract_id.0.as_str(),
            homeowner,
            &record.amount_due.to_string(),
            &paid.to_string(),
            &record.balance.to_string(),
            record.status.label(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ExportError::Csv(error.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}
