use anyhow::Result;
use async_trait::async_trait;

mod accounts;
mod client;
mod session;
mod transactions;

pub use accounts::{AccountId, AccountInfo};
pub use client::ActualBudget;
pub use session::ActualSession;
pub use transactions::{ExistingTransaction, NormalizedTransaction};

/// A budget that transactions can be imported into.
#[async_trait]
pub trait BudgetBackend: Send + Sync {
    type Session: BudgetSession;

    async fn connect(&self) -> Result<Self::Session>;
}

/// An open connection to a budget. Callers must call [BudgetSession::disconnect] once they're
/// done, on success and on error paths alike.
#[async_trait]
pub trait BudgetSession: Send {
    async fn get_accounts(&self) -> Result<Vec<AccountInfo>>;

    /// Transactions already in the budget, optionally only those of one account.
    async fn get_transactions(
        &self,
        account_id: Option<&AccountId>,
    ) -> Result<Vec<ExistingTransaction>>;

    async fn create_transaction(&mut self, transaction: &NormalizedTransaction) -> Result<()>;

    /// Make all transactions created so far durable.
    async fn commit(&mut self) -> Result<()>;

    async fn disconnect(&mut self) -> Result<()>;
}

#[async_trait]
impl BudgetBackend for ActualBudget {
    type Session = ActualSession;

    async fn connect(&self) -> Result<ActualSession> {
        ActualBudget::connect(self).await
    }
}

#[async_trait]
impl BudgetSession for ActualSession {
    async fn get_accounts(&self) -> Result<Vec<AccountInfo>> {
        accounts::get_accounts(self).await
    }

    async fn get_transactions(
        &self,
        account_id: Option<&AccountId>,
    ) -> Result<Vec<ExistingTransaction>> {
        transactions::get_transactions(self, account_id).await
    }

    async fn create_transaction(&mut self, transaction: &NormalizedTransaction) -> Result<()> {
        transactions::create_transaction(self, transaction).await
    }

    async fn commit(&mut self) -> Result<()> {
        ActualSession::commit(self).await
    }

    async fn disconnect(&mut self) -> Result<()> {
        ActualSession::disconnect(self).await
    }
}
