use crate::actual_api::{self, BudgetBackend, BudgetSession};
use crate::error::ImportError;
use crate::finance_api::{self, TransactionSource};

use super::Importer;

/// Accounts of both systems, to write the account mapping from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountListing {
    pub finance_accounts: Vec<finance_api::AccountInfo>,
    pub actual_accounts: Vec<actual_api::AccountInfo>,
}

impl<S: TransactionSource, B: BudgetBackend> Importer<'_, S, B> {
    pub async fn sync_accounts(&self) -> Result<AccountListing, ImportError> {
        let finance_accounts = self
            .source
            .get_accounts()
            .await
            .map_err(ImportError::SourceFetch)?;
        for account in &finance_accounts {
            log::debug!(
                "Finance API account: ID: {}, Name: {}",
                account.id.as_deref().unwrap_or("N/A"),
                account.name.as_deref().unwrap_or("N/A")
            );
        }

        let mut session = self
            .budget
            .connect()
            .await
            .map_err(ImportError::DestinationAuth)?;
        let actual_accounts = session
            .get_accounts()
            .await
            .map_err(ImportError::DestinationFetch);
        if let Err(err) = session.disconnect().await {
            log::error!("Error disconnecting from Actual Budget: {err:#}");
        }
        let actual_accounts = actual_accounts?;
        for account in &actual_accounts {
            log::debug!(
                "Actual Budget account: ID: {}, Name: {}",
                account.id.0,
                account.name
            );
        }

        Ok(AccountListing {
            finance_accounts,
            actual_accounts,
        })
    }
}
