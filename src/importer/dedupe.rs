use std::collections::HashSet;

use crate::actual_api::{BudgetSession, NormalizedTransaction};

/// Imported ids of the transactions that are already in the budget.
#[derive(Debug, Default)]
pub struct ExistingImportedIds {
    ids: HashSet<String>,
}

impl ExistingImportedIds {
    /// If the existing transactions can't be fetched, this logs a warning and returns an empty
    /// set, i.e. the import goes ahead without duplicate detection.
    pub async fn fetch(session: &impl BudgetSession) -> Self {
        match session.get_transactions(None).await {
            Ok(existing) => existing
                .into_iter()
                .filter_map(|transaction| transaction.imported_id)
                .collect(),
            Err(err) => {
                log::warn!(
                    "Could not fetch existing transactions, importing without duplicate detection: {err:#}"
                );
                Self::default()
            }
        }
    }

    pub fn contains(&self, transaction: &NormalizedTransaction) -> bool {
        transaction
            .imported_id
            .as_ref()
            .is_some_and(|id| self.ids.contains(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl FromIterator<String> for ExistingImportedIds {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().filter(|id| !id.is_empty()).collect(),
        }
    }
}
