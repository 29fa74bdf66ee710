use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{client::FinanceApi, id::deserialize_id};

/// Status value of transactions that have fully settled.
pub const SETTLED_STATUS: &str = "SETTLED";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<String>,
    pub range: DateRange,
}

impl TransactionFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(account_id) = &self.account_id {
            query.push(("accountId", account_id.clone()));
        }
        if let Some(start) = self.range.start {
            query.push(("startDate", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.range.end {
            query.push(("endDate", end.format(DATE_FORMAT).to_string()));
        }
        query
    }
}

/// A transaction as the finance API returns it. Every field is optional on the wire.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    #[serde(rename = "AccountID", default, deserialize_with = "deserialize_id")]
    pub account_id: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Amount", default)]
    pub amount: Option<Decimal>,
    #[serde(rename = "Vendor", default)]
    pub vendor: Option<String>,
    #[serde(rename = "Merchant", default)]
    pub merchant: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "ID", default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

pub async fn get_transactions(
    client: &FinanceApi,
    filter: &TransactionFilter,
) -> Result<Vec<RawTransaction>> {
    log::info!("Requesting finance API transactions...");
    let transactions: Vec<RawTransaction> =
        client.get("/api/transactions", &filter.query()).await?;
    log::info!(
        "Requesting finance API transactions...done, got {}",
        transactions.len()
    );
    Ok(transactions)
}
