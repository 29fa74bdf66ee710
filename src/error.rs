use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort an import run or an account listing. Failures the run recovers from
/// (fetching existing imported ids, submitting a single transaction) are logged where they
/// happen and never surface here.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Failed to fetch data from the finance API")]
    SourceFetch(#[source] anyhow::Error),

    #[error("Failed to connect to Actual Budget")]
    DestinationAuth(#[source] anyhow::Error),

    #[error("Failed to fetch data from Actual Budget")]
    DestinationFetch(#[source] anyhow::Error),

    /// The individual creates were already sent when this happens, so Actual Budget may hold
    /// any subset of them depending on how it applies changes before the sync.
    #[error("Failed to commit imported transactions to Actual Budget")]
    Commit(#[source] anyhow::Error),
}
