use crate::actual_api::{BudgetBackend, BudgetSession, NormalizedTransaction};
use crate::config::AccountMapping;
use crate::error::ImportError;
use crate::finance_api::{DateRange, RawTransaction, TransactionFilter, TransactionSource};

mod accounts;
mod dedupe;
mod mapper;
mod stats;
#[cfg(test)]
mod testutils;

pub use accounts::AccountListing;
pub use dedupe::ExistingImportedIds;
pub use mapper::map_transaction;
pub use stats::{ImportStats, SubmissionOutcome};

/// How many transactions a dry run shows
const PREVIEW_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Live,
    /// Fetch and map transactions but don't touch Actual Budget
    DryRun,
}

/// Moves transactions from the finance API into Actual Budget.
pub struct Importer<'a, S, B> {
    source: &'a S,
    budget: &'a B,
    account_mapping: &'a AccountMapping,
}

impl<'a, S: TransactionSource, B: BudgetBackend> Importer<'a, S, B> {
    pub fn new(source: &'a S, budget: &'a B, account_mapping: &'a AccountMapping) -> Self {
        Self {
            source,
            budget,
            account_mapping,
        }
    }

    /// Import all transactions in the date range that aren't in the budget yet.
    ///
    /// Transactions are submitted in the order the finance API returns them, and committed
    /// together at the end. Transactions that fail to submit are counted and the run carries on.
    pub async fn import_transactions(
        &self,
        range: DateRange,
        mode: RunMode,
    ) -> Result<ImportStats, ImportError> {
        log::info!("Starting transaction import");
        let raw_transactions = self
            .source
            .get_transactions(&TransactionFilter {
                account_id: None,
                range,
            })
            .await
            .map_err(ImportError::SourceFetch)?;

        let transactions = self.transform(&raw_transactions);
        log::info!(
            "Transformed {} of {} transactions",
            transactions.len(),
            raw_transactions.len()
        );

        let stats = match mode {
            RunMode::DryRun => preview(&transactions),
            RunMode::Live => self.submit(&transactions).await?,
        };
        log::info!("Import complete: {stats}");
        Ok(stats)
    }

    fn transform(&self, raw_transactions: &[RawTransaction]) -> Vec<NormalizedTransaction> {
        raw_transactions
            .iter()
            .filter_map(|transaction| {
                let mapped = map_transaction(transaction, self.account_mapping);
                if mapped.is_none() {
                    log::warn!(
                        "No mapping found for account ID: {}",
                        transaction.account_id.as_deref().unwrap_or("")
                    );
                }
                mapped
            })
            .collect()
    }

    async fn submit(
        &self,
        transactions: &[NormalizedTransaction],
    ) -> Result<ImportStats, ImportError> {
        log::info!("Importing transactions into Actual Budget");
        let mut session = self
            .budget
            .connect()
            .await
            .map_err(ImportError::DestinationAuth)?;
        let result = submit_to_session(&mut session, transactions).await;
        if let Err(err) = session.disconnect().await {
            log::error!("Error disconnecting from Actual Budget: {err:#}");
        }
        result
    }
}

fn preview(transactions: &[NormalizedTransaction]) -> ImportStats {
    log::info!("Dry run mode - not importing transactions");
    for transaction in transactions.iter().take(PREVIEW_LEN) {
        log::info!("Would import: {transaction:?}");
    }
    if transactions.len() > PREVIEW_LEN {
        log::info!("... and {} more", transactions.len() - PREVIEW_LEN);
    }
    ImportStats::new_dry_run(transactions.len())
}

async fn submit_to_session(
    session: &mut impl BudgetSession,
    transactions: &[NormalizedTransaction],
) -> Result<ImportStats, ImportError> {
    let existing = ExistingImportedIds::fetch(&*session).await;
    log::debug!("Found {} previously imported transactions", existing.len());

    let mut stats = ImportStats::default();
    for transaction in transactions {
        let outcome = if existing.contains(transaction) {
            log::debug!(
                "Skipping duplicate transaction: {}",
                transaction.imported_id.as_deref().unwrap_or("")
            );
            SubmissionOutcome::Skipped
        } else {
            match session.create_transaction(transaction).await {
                Ok(()) => SubmissionOutcome::Imported,
                Err(err) => {
                    log::error!("Error importing transaction {transaction:?}: {err:#}");
                    SubmissionOutcome::Failed
                }
            }
        };
        stats.record(outcome);
    }

    session.commit().await.map_err(ImportError::Commit)?;
    Ok(stats)
}
