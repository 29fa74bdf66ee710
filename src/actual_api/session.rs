use anyhow::{bail, Context as _, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::Secret;
use crate::http::{check_status, decode};

use super::accounts::AccountInfo;

const API_KEY_HEADER: &str = "x-api-key";
const ENCRYPTION_PASSWORD_HEADER: &str = "budget-encryption-password";

/// An open budget on an Actual HTTP API server.
///
/// Dropping a session without calling [ActualSession::disconnect] logs a warning.
pub struct ActualSession {
    http: reqwest::Client,
    budget_url: String,
    api_key: Secret,
    encryption_key: Option<Secret>,
    connected: bool,
}

#[derive(Deserialize)]
struct DataResponse<T> {
    data: T,
}

impl ActualSession {
    /// Checks that the key is accepted and the budget can be loaded by listing its accounts.
    pub(super) async fn open(
        http: reqwest::Client,
        server_url: &str,
        budget_id: &str,
        api_key: Secret,
        encryption_key: Option<Secret>,
    ) -> Result<Self> {
        let mut session = Self {
            http,
            budget_url: format!("{server_url}/v1/budgets/{budget_id}"),
            api_key,
            encryption_key,
            connected: true,
        };
        match session.get::<Vec<AccountInfo>>("/accounts", &[]).await {
            Ok(accounts) => {
                log::debug!("Budget {budget_id} has {} accounts", accounts.len());
                Ok(session)
            }
            Err(err) => {
                session.connected = false;
                Err(err.context(format!("Failed to open budget {budget_id}")))
            }
        }
    }

    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.ensure_connected()?;
        let url = format!("{}{}", self.budget_url, path);
        log::debug!("GET {url} {query:?}");
        let response = self
            .authorize(self.http.get(&url).query(query))
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        let response: DataResponse<T> = decode(response, &url).await?;
        Ok(response.data)
    }

    pub(super) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.ensure_connected()?;
        let url = format!("{}{}", self.budget_url, path);
        log::debug!("POST {url}");
        let response = self
            .authorize(self.http.post(&url).json(body))
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        check_status(response, &url).await?;
        Ok(())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header(API_KEY_HEADER, self.api_key.get());
        match &self.encryption_key {
            Some(key) => request.header(ENCRYPTION_PASSWORD_HEADER, key.get()),
            None => request,
        }
    }

    fn ensure_connected(&self) -> Result<()> {
        if !self.connected {
            bail!("Actual Budget session is already disconnected");
        }
        Ok(())
    }

    /// The HTTP API syncs every change to the Actual server before it answers the request, so
    /// there is nothing left to send here.
    pub async fn commit(&mut self) -> Result<()> {
        self.ensure_connected()?;
        log::info!("Changes were synced to Actual Budget");
        Ok(())
    }

    /// Idempotent. Later requests on this session fail.
    pub async fn disconnect(&mut self) -> Result<()> {
        if self.connected {
            self.connected = false;
            log::info!("Disconnected from Actual Budget");
        }
        Ok(())
    }
}

impl Drop for ActualSession {
    fn drop(&mut self) {
        if self.connected {
            log::warn!("Actual Budget session was dropped without disconnecting");
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    async fn open_session(
        server: &MockServer,
        encryption_key: Option<&str>,
    ) -> Result<ActualSession> {
        ActualSession::open(
            reqwest::Client::new(),
            &server.base_url(),
            "budget-1",
            Secret::new("the-key".to_string()),
            encryption_key.map(|key| Secret::new(key.to_string())),
        )
        .await
    }

    #[tokio::test]
    async fn open_checks_budget_with_credentials() {
        let server = MockServer::start_async().await;
        let accounts = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/budgets/budget-1/accounts")
                    .header("x-api-key", "the-key")
                    .header("budget-encryption-password", "secret");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;

        let mut session = open_session(&server, Some("secret")).await.unwrap();

        accounts.assert_async().await;
        assert!(session.connected);
        session.disconnect().await.unwrap();
    }

    #[tokio::test]
    async fn failed_open() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/budgets/budget-1/accounts");
                then.status(401).body("unauthorized");
            })
            .await;

        let err = open_session(&server, None).await.err().unwrap();

        assert_eq!("Failed to open budget budget-1", err.to_string());
        assert!(format!("{err:#}").contains("401"), "{err:#}");
    }

    #[tokio::test]
    async fn disconnect_is_idempotent_and_ends_the_session() {
        let server = MockServer::start_async().await;
        let accounts = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/budgets/budget-1/accounts");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;
        let mut session = open_session(&server, None).await.unwrap();

        session.disconnect().await.unwrap();
        session.disconnect().await.unwrap();

        assert!(!session.connected);
        assert!(session.commit().await.is_err());
        assert!(session
            .get::<Vec<AccountInfo>>("/accounts", &[])
            .await
            .is_err());
        accounts.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn commit_sends_nothing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/budgets/budget-1/accounts");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;
        let mut session = open_session(&server, None).await.unwrap();
        let any_post = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        session.commit().await.unwrap();

        any_post.assert_hits_async(0).await;
        session.disconnect().await.unwrap();
    }
}
