use anyhow::{bail, Context as _, Result};
use serde::de::DeserializeOwned;

/// Fails with the status and response body if the request wasn't successful.
pub async fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Request to {url} failed with status {status}: {body}");
    }
    Ok(response)
}

pub async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
    check_status(response, url)
        .await?
        .json()
        .await
        .with_context(|| format!("Failed to decode response from {url}"))
}
