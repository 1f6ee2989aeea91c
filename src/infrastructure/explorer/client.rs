//! Block-explorer HTTP client (Etherscan-compatible API)

use std::time::Duration;

use alloy::primitives::{Address, B256};
use reqwest::Client;

use super::types::{ApiResponse, LogQuery, SourceEntry, NO_RECORDS};
use crate::domain::address::checksummed;

/// Basescan API endpoint
pub const BASESCAN_API_URL: &str = "https://api.basescan.org/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("explorer returned invalid JSON for {action}: {source}")]
    Decode {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("explorer returned an unexpected result for {action}")]
    UnexpectedResult { action: &'static str },
    #[error("explorer {action} query for {address} failed: {reason}")]
    ApiFailure {
        action: &'static str,
        address: String,
        reason: String,
    },
}

/// Queries the sweep needs from a block explorer
#[async_trait::async_trait]
pub trait ExplorerClient: Send + Sync {
    /// Verified source listing, `None` when unverified or empty
    async fn source_code(&self, address: Address) -> Result<Option<String>, ExplorerError>;

    /// Logs emitted by `address` whose first topic is `topic0`
    async fn logs(&self, address: Address, topic0: B256) -> Result<LogQuery, ExplorerError>;
}

#[derive(Debug, Clone)]
pub struct BasescanClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl BasescanClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExplorerError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http_client(api_key, http))
    }

    pub fn with_http_client(api_key: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: BASESCAN_API_URL.to_string(),
        }
    }

    /// Point the client at another Etherscan-compatible endpoint
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn get(
        &self,
        action: &'static str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, ExplorerError> {
        let body = self
            .http
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|source| ExplorerError::Decode { action, source })
    }
}

#[async_trait::async_trait]
impl ExplorerClient for BasescanClient {
    async fn source_code(&self, address: Address) -> Result<Option<String>, ExplorerError> {
        let response = self
            .get(
                "getsourcecode",
                &[
                    ("module", "contract".to_string()),
                    ("action", "getsourcecode".to_string()),
                    ("address", checksummed(&address)),
                ],
            )
            .await?;

        if !response.is_ok() {
            tracing::debug!(%address, reason = %response.failure_reason(), "no source listing");
            return Ok(None);
        }

        let entries: Vec<SourceEntry> =
            serde_json::from_value(response.result).map_err(|_| {
                ExplorerError::UnexpectedResult {
                    action: "getsourcecode",
                }
            })?;

        Ok(entries
            .into_iter()
            .next()
            .map(|entry| entry.source_code)
            .filter(|code| !code.is_empty()))
    }

    async fn logs(&self, address: Address, topic0: B256) -> Result<LogQuery, ExplorerError> {
        let response = self
            .get(
                "getLogs",
                &[
                    ("module", "logs".to_string()),
                    ("action", "getLogs".to_string()),
                    ("address", checksummed(&address)),
                    ("topic0", format!("0x{}", hex::encode(topic0))),
                ],
            )
            .await?;

        if !response.is_ok() {
            if response.message == NO_RECORDS {
                return Ok(LogQuery::NoRecords);
            }
            return Ok(LogQuery::Failed(response.failure_reason()));
        }

        match response.result.as_array() {
            Some(entries) => Ok(LogQuery::Found(entries.len())),
            None => Err(ExplorerError::UnexpectedResult { action: "getLogs" }),
        }
    }
}
