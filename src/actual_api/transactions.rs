use anyhow::{anyhow, Context as _, Result};
use chrono::NaiveDate;
use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::accounts::{get_accounts, AccountId};
use super::session::ActualSession;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Lower bound for listing transactions; the API requires one.
const ALL_TIME_START: &str = "1970-01-01";

/// A transaction in the shape Actual Budget expects. Negative amounts are outflows, positive
/// amounts are inflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTransaction {
    pub account_id: AccountId,
    /// `YYYY-MM-DD`
    pub date: String,
    pub amount: Decimal,
    pub payee_name: String,
    pub notes: String,
    /// Id of the transaction in the system it was imported from. Used to recognize
    /// transactions that were already imported.
    pub imported_id: Option<String>,
    pub cleared: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExistingTransaction {
    pub id: String,
    #[serde(default)]
    pub account: Option<AccountId>,
    #[serde(default)]
    pub imported_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionRequest<'a> {
    learn_categories: bool,
    run_transfers: bool,
    transaction: TransactionPayload<'a>,
}

/// The account is part of the request path, not of the payload.
#[derive(Serialize, Debug, PartialEq, Eq)]
struct TransactionPayload<'a> {
    date: String,
    /// Actual Budget stores amounts as integer cents
    amount: i64,
    payee_name: &'a str,
    notes: &'a str,
    imported_id: Option<&'a str>,
    cleared: bool,
}

impl<'a> TransactionPayload<'a> {
    fn new(transaction: &'a NormalizedTransaction) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&transaction.date, DATE_FORMAT)
            .with_context(|| format!("Invalid transaction date {:?}", transaction.date))?;
        Ok(Self {
            date: date.format(DATE_FORMAT).to_string(),
            amount: amount_to_cents(transaction.amount)?,
            payee_name: &transaction.payee_name,
            notes: &transaction.notes,
            imported_id: transaction.imported_id.as_deref(),
            cleared: transaction.cleared,
        })
    }
}

fn amount_to_cents(amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| anyhow!("Amount {amount} is out of range"))
}

fn transactions_path(account_id: &AccountId) -> String {
    format!("/accounts/{}/transactions", account_id.0)
}

/// Existing transactions of one account, or of all accounts of the budget.
pub async fn get_transactions(
    session: &ActualSession,
    account_id: Option<&AccountId>,
) -> Result<Vec<ExistingTransaction>> {
    let account_ids = match account_id {
        Some(account_id) => vec![account_id.clone()],
        None => get_accounts(session)
            .await?
            .into_iter()
            .map(|account| account.id)
            .collect(),
    };

    log::info!("Requesting existing Actual Budget transactions...");
    let query = [("since_date", ALL_TIME_START.to_string())];
    let mut transactions = Vec::new();
    for account_id in &account_ids {
        let account_transactions: Vec<ExistingTransaction> =
            session.get(&transactions_path(account_id), &query).await?;
        transactions.extend(account_transactions);
    }
    log::info!(
        "Requesting existing Actual Budget transactions...done, got {}",
        transactions.len()
    );
    Ok(transactions)
}

pub async fn create_transaction(
    session: &ActualSession,
    transaction: &NormalizedTransaction,
) -> Result<()> {
    let request = CreateTransactionRequest {
        learn_categories: false,
        run_transfers: false,
        transaction: TransactionPayload::new(transaction)?,
    };
    session
        .post(&transactions_path(&transaction.account_id), &request)
        .await?;
    log::debug!(
        "Imported transaction: {} {}",
        transaction.payee_name,
        transaction.amount
    );
    Ok(())
}
