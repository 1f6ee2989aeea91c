//! Top-level run: connect, read, sweep, write

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::infrastructure::{create_provider, BasescanClient, EthereumProvider, ProviderConfig};
use crate::modules::export;
use crate::modules::sweep::{SweepSummary, Sweeper};

/// Execute one sweep with resolved settings
pub async fn run(settings: &Settings) -> Result<SweepSummary> {
    let config = ProviderConfig::from_url(&settings.rpc_url);
    let provider = create_provider(config).await?;
    connect(provider.as_ref()).await?;

    let explorer = BasescanClient::new(settings.api_key.clone())
        .context("Failed to create HTTP client")?
        .with_base_url(settings.explorer_url.clone());

    let rows = export::read_contracts(&settings.input)?;
    tracing::info!(rows = rows.len(), input = %settings.input.display(), "loaded contracts");

    let sweeper = Sweeper::new(provider.as_ref(), &explorer, settings.sweep.clone());
    let report = sweeper.run(&rows).await?;

    export::write_results(&settings.output, &report.records)?;

    let summary = report.summary;
    tracing::info!(
        read = summary.rows_read,
        invalid_address = summary.invalid_address,
        zero_balance = summary.zero_balance,
        written = summary.written,
        non_token = summary.non_token,
        "sweep finished"
    );
    Ok(summary)
}

/// Startup connectivity check, returns the chain id
pub async fn connect(provider: &dyn EthereumProvider) -> Result<u64> {
    let chain_id = provider
        .chain_id()
        .await
        .with_context(|| format!("Failed to connect to RPC {}", provider.endpoint_name()))?;
    tracing::info!(endpoint = %provider.endpoint_name(), chain_id, "connected");
    Ok(chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, Bytes, U256};
    use alloy::rpc::types::TransactionRequest;
    use std::path::PathBuf;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::modules::sweep::SweepSettings;

    /// Node that answers `eth_chainId` (or not) and nothing else
    struct Node(Option<u64>);

    #[async_trait::async_trait]
    impl EthereumProvider for Node {
        async fn chain_id(&self) -> Result<u64> {
            self.0.ok_or_else(|| anyhow::anyhow!("connection refused"))
        }

        async fn get_balance(&self, _address: Address) -> Result<U256> {
            unreachable!("no balance lookups before connecting")
        }

        async fn call(&self, _request: TransactionRequest) -> Result<Bytes> {
            unreachable!("no calls before connecting")
        }

        async fn get_code(&self, _address: Address) -> Result<Bytes> {
            unreachable!("no code lookups before connecting")
        }

        fn endpoint_name(&self) -> String {
            "http://node.test".to_string()
        }
    }

    #[tokio::test]
    async fn test_connect_returns_chain_id() {
        assert_eq!(connect(&Node(Some(8453))).await.unwrap(), 8453);
    }

    #[tokio::test]
    async fn test_connect_failure_is_fatal() {
        let err = connect(&Node(None)).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to connect to RPC http://node.test"));
        assert!(message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_run_aborts_when_node_unreachable() {
        let node = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&node)
            .await;

        let output = std::env::temp_dir().join(format!(
            "contract-sweep-unreachable-{}.csv",
            std::process::id()
        ));
        let settings = Settings {
            rpc_url: node.uri(),
            api_key: "KEY".to_string(),
            input: PathBuf::from("does-not-matter.csv"),
            output: output.clone(),
            explorer_url: "http://127.0.0.1:9".to_string(),
            sweep: SweepSettings::default(),
        };

        let err = run(&settings).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to connect to RPC"));
        assert!(!output.exists());
    }
}
