use anyhow::Result;
use async_trait::async_trait;

mod accounts;
mod client;
mod id;
mod transactions;

pub use accounts::AccountInfo;
pub use client::FinanceApi;
pub use transactions::{DateRange, RawTransaction, TransactionFilter, SETTLED_STATUS};

/// Where raw transactions come from.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn get_accounts(&self) -> Result<Vec<AccountInfo>>;
    async fn get_transactions(&self, filter: &TransactionFilter) -> Result<Vec<RawTransaction>>;
}

#[async_trait]
impl TransactionSource for FinanceApi {
    async fn get_accounts(&self) -> Result<Vec<AccountInfo>> {
        accounts::get_accounts(self).await
    }

    async fn get_transactions(&self, filter: &TransactionFilter) -> Result<Vec<RawTransaction>> {
        transactions::get_transactions(self, filter).await
    }
}
