use std::time::Duration;

use anyhow::{Context as _, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::{FinanceApiConfig, Secret};
use crate::http::decode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct FinanceApi {
    base_url: String,
    http: reqwest::Client,
    token: Option<Secret>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl FinanceApi {
    /// Create a client for the finance API. If credentials are configured, this logs in and
    /// all later requests carry the returned token.
    pub async fn connect(config: &FinanceApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        let mut client = Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            http,
            token: None,
        };
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client.token = Some(client.authenticate(username, password).await?);
        }
        Ok(client)
    }

    async fn authenticate(&self, username: &str, password: &Secret) -> Result<Secret> {
        log::info!("Authenticating with finance API...");
        let url = self.url("/api/auth/login");
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username,
                password: password.get(),
            })
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        let response: LoginResponse = decode(response, &url).await?;
        log::info!("Authenticating with finance API...done");
        Ok(Secret::new(response.token))
    }

    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        log::debug!("GET {url} {query:?}");
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.get());
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        decode(response, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
