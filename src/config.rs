use std::collections::HashMap;
use std::fmt::Debug;

use thiserror::Error;

const DEFAULT_FINANCE_API_URL: &str = "http://localhost:5000";
const DEFAULT_ACTUAL_SERVER_URL: &str = "http://localhost:5007";

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Configuration errors: {}", .missing.join(", "))]
pub struct ConfigError {
    pub missing: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub finance_api: FinanceApiConfig,
    pub actual: ActualConfig,
    pub account_mapping: AccountMapping,
}

#[derive(Debug, Clone)]
pub struct FinanceApiConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<Secret>,
}

#[derive(Debug, Clone)]
pub struct ActualConfig {
    /// Base URL of the Actual HTTP API server
    pub server_url: String,
    /// API key of the Actual HTTP API server
    pub password: Secret,
    pub budget_id: String,
    pub encryption_key: Option<Secret>,
}

impl Config {
    /// Load the configuration from the process environment, after merging in a `.env` file
    /// from the working directory if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("Could not load .env file: {err}"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup. Every missing required variable is
    /// reported in the returned error, not just the first one.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut missing = Vec::new();
        let mut require = |key: &str, default: Option<&str>| {
            let value = match lookup(key) {
                Some(value) => Some(value),
                None => default.map(str::to_string),
            }
            .filter(|value| !value.is_empty());
            if value.is_none() {
                missing.push(format!("{key} is required"));
            }
            value.unwrap_or_default()
        };

        let finance_api_url = require("FINANCE_API_URL", Some(DEFAULT_FINANCE_API_URL));
        let actual_server_url = require("ACTUAL_SERVER_URL", Some(DEFAULT_ACTUAL_SERVER_URL));
        let actual_password = require("ACTUAL_PASSWORD", None);
        let actual_budget_id = require("ACTUAL_BUDGET_ID", None);
        if !missing.is_empty() {
            return Err(ConfigError { missing });
        }

        Ok(Self {
            finance_api: FinanceApiConfig {
                url: finance_api_url,
                username: get("FINANCE_API_USERNAME"),
                password: get("FINANCE_API_PASSWORD").map(Secret::new),
            },
            actual: ActualConfig {
                server_url: actual_server_url,
                password: Secret::new(actual_password),
                budget_id: actual_budget_id,
                encryption_key: get("ACTUAL_ENCRYPTION_KEY").map(Secret::new),
            },
            account_mapping: AccountMapping::parse(&get("ACCOUNT_MAPPING").unwrap_or_default()),
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[redacted]")
    }
}

/// Maps finance API account ids to Actual Budget account ids. An empty mapping passes
/// account ids through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountMapping {
    accounts: HashMap<String, String>,
}

impl AccountMapping {
    /// Parse a mapping of the form `finance_id1:actual_id1,finance_id2:actual_id2`.
    pub fn parse(mapping: &str) -> Self {
        let mut accounts = HashMap::new();
        for pair in mapping.split(',').filter(|pair| !pair.trim().is_empty()) {
            let Some((finance_id, actual_id)) = pair.split_once(':') else {
                log::warn!("Ignoring account mapping entry without ':': {pair:?}");
                continue;
            };
            let (finance_id, actual_id) = (finance_id.trim(), actual_id.trim());
            if finance_id.is_empty() || actual_id.is_empty() {
                log::warn!("Ignoring incomplete account mapping entry: {pair:?}");
                continue;
            }
            accounts.insert(finance_id.to_string(), actual_id.to_string());
        }
        Self { accounts }
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns the Actual Budget account for a finance API account, or `None` if the mapping
    /// is non-empty and doesn't contain it.
    pub fn resolve<'a>(&'a self, finance_account_id: &'a str) -> Option<&'a str> {
        if self.accounts.is_empty() {
            Some(finance_account_id)
        } else {
            self.accounts.get(finance_account_id).map(String::as_str)
        }
    }
}

impl FromIterator<(String, String)> for AccountMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}
