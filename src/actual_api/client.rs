use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::config::{ActualConfig, Secret};

use super::session::ActualSession;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for an [Actual HTTP API](https://github.com/jhonderson/actual-http-api)
/// server in front of Actual Budget. Nothing is sent over the network until
/// [ActualBudget::connect] is called.
pub struct ActualBudget {
    server_url: String,
    budget_id: String,
    api_key: Secret,
    encryption_key: Option<Secret>,
    http: reqwest::Client,
}

impl ActualBudget {
    pub fn new(config: &ActualConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            server_url: config.server_url.trim_end_matches('/').to_string(),
            budget_id: config.budget_id.clone(),
            api_key: config.password.clone(),
            encryption_key: config.encryption_key.clone(),
            http,
        })
    }

    pub async fn connect(&self) -> Result<ActualSession> {
        log::info!("Connecting to Actual Budget at {}", self.server_url);
        let session = ActualSession::open(
            self.http.clone(),
            &self.server_url,
            &self.budget_id,
            self.api_key.clone(),
            self.encryption_key.clone(),
        )
        .await?;
        log::info!("Successfully connected to Actual Budget");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn config(server_url: String, encryption_key: Option<&str>) -> ActualConfig {
        ActualConfig {
            server_url,
            password: Secret::new("api-key".to_string()),
            budget_id: "budget-1".to_string(),
            encryption_key: encryption_key.map(|key| Secret::new(key.to_string())),
        }
    }

    #[tokio::test]
    async fn connect_sends_configured_credentials() {
        let server = MockServer::start_async().await;
        let accounts = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/budgets/budget-1/accounts")
                    .header("x-api-key", "api-key")
                    .header("budget-encryption-password", "secret-key");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;

        let budget =
            ActualBudget::new(&config(format!("{}/", server.base_url()), Some("secret-key")))
                .unwrap();
        let mut session = budget.connect().await.unwrap();
        session.disconnect().await.unwrap();

        accounts.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_api_key() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/budgets/budget-1/accounts");
                then.status(401)
                    .json_body(json!({"error": "Unauthorized"}));
            })
            .await;

        let budget = ActualBudget::new(&config(server.base_url(), None)).unwrap();
        let err = budget.connect().await.err().unwrap();

        assert!(format!("{err:#}").contains("Unauthorized"), "{err:#}");
    }

    #[tokio::test]
    async fn unreachable_server() {
        let budget =
            ActualBudget::new(&config("http://127.0.0.1:1".to_string(), None)).unwrap();

        assert!(budget.connect().await.is_err());
    }
}
