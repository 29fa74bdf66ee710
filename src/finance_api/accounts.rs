use anyhow::Result;
use serde::Deserialize;

use super::{client::FinanceApi, id::deserialize_id};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn get_accounts(client: &FinanceApi) -> Result<Vec<AccountInfo>> {
    log::info!("Requesting finance API accounts...");
    let accounts: Vec<AccountInfo> = client.get("/api/accounts", &[]).await?;
    log::info!(
        "Requesting finance API accounts...done, got {}",
        accounts.len()
    );
    Ok(accounts)
}
