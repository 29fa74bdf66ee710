use rust_decimal::Decimal;

use crate::actual_api::{AccountId, NormalizedTransaction};
use crate::config::AccountMapping;
use crate::finance_api::{RawTransaction, SETTLED_STATUS};

const UNKNOWN_PAYEE: &str = "Unknown";

/// Convert a finance API transaction into the shape Actual Budget expects.
///
/// Returns `None` if the account mapping is non-empty and doesn't know the transaction's
/// account. Such transactions must not be imported.
pub fn map_transaction(
    transaction: &RawTransaction,
    account_mapping: &AccountMapping,
) -> Option<NormalizedTransaction> {
    let finance_account_id = transaction.account_id.as_deref().unwrap_or("");
    let actual_account_id = account_mapping.resolve(finance_account_id)?;

    Some(NormalizedTransaction {
        account_id: AccountId::new(actual_account_id.to_string()),
        date: date_only(transaction.date.as_deref().unwrap_or("")).to_string(),
        amount: transaction.amount.unwrap_or(Decimal::ZERO),
        payee_name: transaction
            .vendor
            .as_ref()
            .or(transaction.merchant.as_ref())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_PAYEE.to_string()),
        notes: transaction.note.clone().unwrap_or_default(),
        imported_id: transaction.id.clone(),
        cleared: transaction.status.as_deref() == Some(SETTLED_STATUS),
    })
}

/// Cut off the time of an ISO 8601 timestamp
fn date_only(date: &str) -> &str {
    match date.split_once('T') {
        Some((date, _time)) => date,
        None => date,
    }
}
