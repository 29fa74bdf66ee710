//! In-memory stand-ins for the finance API and Actual Budget.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::actual_api::{
    self, AccountId, BudgetBackend, BudgetSession, ExistingTransaction, NormalizedTransaction,
};
use crate::finance_api::{self, RawTransaction, TransactionFilter, TransactionSource};

pub fn raw_transaction(account_id: &str, id: &str) -> RawTransaction {
    RawTransaction {
        account_id: Some(account_id.to_string()),
        date: Some("2024-03-05T10:30:00".to_string()),
        amount: Some(Decimal::new(-1999, 2)),
        vendor: Some(format!("Vendor {id}")),
        merchant: None,
        note: None,
        id: Some(id.to_string()),
        status: Some("SETTLED".to_string()),
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub accounts: Vec<finance_api::AccountInfo>,
    pub transactions: Vec<RawTransaction>,
    pub fail: bool,
    pub requested_filters: Mutex<Vec<TransactionFilter>>,
}

#[async_trait]
impl TransactionSource for FakeSource {
    async fn get_accounts(&self) -> Result<Vec<finance_api::AccountInfo>> {
        if self.fail {
            bail!("finance API unavailable");
        }
        Ok(self.accounts.clone())
    }

    async fn get_transactions(&self, filter: &TransactionFilter) -> Result<Vec<RawTransaction>> {
        self.requested_filters.lock().unwrap().push(filter.clone());
        if self.fail {
            bail!("finance API unavailable");
        }
        Ok(self.transactions.clone())
    }
}

#[derive(Default)]
pub struct FakeBudgetState {
    pub accounts: Vec<actual_api::AccountInfo>,
    /// Transactions that made it into the budget
    pub transactions: Vec<NormalizedTransaction>,
    /// Creates of transactions with these imported ids are rejected
    pub reject_imported_ids: HashSet<String>,
    pub fail_connect: bool,
    pub fail_get_accounts: bool,
    pub fail_get_transactions: bool,
    pub fail_commit: bool,
    pub connects: usize,
    pub disconnects: usize,
    pub commits: usize,
}

/// Created transactions only become visible in the budget on commit.
#[derive(Default, Clone)]
pub struct FakeBudget {
    pub state: Arc<Mutex<FakeBudgetState>>,
}

impl FakeBudget {
    pub fn with_state(state: FakeBudgetState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn imported_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter_map(|transaction| transaction.imported_id.clone())
            .collect()
    }
}

pub struct FakeSession {
    state: Arc<Mutex<FakeBudgetState>>,
    pending: Vec<NormalizedTransaction>,
}

#[async_trait]
impl BudgetBackend for FakeBudget {
    type Session = FakeSession;

    async fn connect(&self) -> Result<FakeSession> {
        let mut state = self.state.lock().unwrap();
        if state.fail_connect {
            bail!("invalid password");
        }
        state.connects += 1;
        Ok(FakeSession {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        })
    }
}

#[async_trait]
impl BudgetSession for FakeSession {
    async fn get_accounts(&self) -> Result<Vec<actual_api::AccountInfo>> {
        let state = self.state.lock().unwrap();
        if state.fail_get_accounts {
            bail!("budget not found");
        }
        Ok(state.accounts.clone())
    }

    async fn get_transactions(
        &self,
        account_id: Option<&AccountId>,
    ) -> Result<Vec<ExistingTransaction>> {
        let state = self.state.lock().unwrap();
        if state.fail_get_transactions {
            bail!("timeout");
        }
        Ok(state
            .transactions
            .iter()
            .filter(|transaction| account_id.map_or(true, |id| &transaction.account_id == id))
            .enumerate()
            .map(|(index, transaction)| ExistingTransaction {
                id: index.to_string(),
                account: Some(transaction.account_id.clone()),
                imported_id: transaction.imported_id.clone(),
            })
            .collect())
    }

    async fn create_transaction(&mut self, transaction: &NormalizedTransaction) -> Result<()> {
        let rejected = transaction.imported_id.as_ref().is_some_and(|id| {
            self.state
                .lock()
                .unwrap()
                .reject_imported_ids
                .contains(id)
        });
        if rejected {
            bail!("transaction rejected");
        }
        self.pending.push(transaction.clone());
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_commit {
            bail!("sync failed");
        }
        state.commits += 1;
        state.transactions.append(&mut self.pending);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.state.lock().unwrap().disconnects += 1;
        Ok(())
    }
}
