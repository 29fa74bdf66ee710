use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::session::ActualSession;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: String) -> Self {
        Self(id)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub id: AccountId,
    pub name: String,
}

pub async fn get_accounts(session: &ActualSession) -> Result<Vec<AccountInfo>> {
    log::info!("Requesting Actual Budget accounts...");
    let accounts: Vec<AccountInfo> = session.get("/accounts", &[]).await?;
    log::info!(
        "Requesting Actual Budget accounts...done, got {}",
        accounts.len()
    );
    Ok(accounts)
}
