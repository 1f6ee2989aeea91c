//! Ethereum provider abstraction and Alloy implementations
//!
//! Only the read-only calls a sweep needs: balances, `eth_call` and deployed code.

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use alloy::rpc::types::TransactionRequest;
use anyhow::{Context, Result};

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
}

impl ProviderConfig {
    /// Pick the transport from the URL scheme
    pub fn from_url(url: &str) -> Self {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("ws://") || lower.starts_with("wss://") {
            ProviderConfig::WebSocket(url.trim().to_string())
        } else {
            ProviderConfig::Http(url.trim().to_string())
        }
    }

    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
        }
    }
}

/// Abstract Ethereum provider trait
///
/// Read-only chain queries used by the balance checker and code fetcher.
#[async_trait::async_trait]
pub trait EthereumProvider: Send + Sync {
    /// Chain id, also used as the startup connectivity check
    async fn chain_id(&self) -> Result<u64>;

    /// Get account balance in wei
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Execute a call (eth_call) at the latest block
    async fn call(&self, request: TransactionRequest) -> Result<Bytes>;

    /// Deployed bytecode at the latest block
    async fn get_code(&self, address: Address) -> Result<Bytes>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

// Type alias for the filled provider, shared by both transports
type FilledProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

/// Enum-based provider that stores concrete types for each transport
pub enum AlloyProvider {
    Http {
        provider: FilledProvider,
        endpoint: String,
    },
    WebSocket {
        provider: FilledProvider,
        endpoint: String,
    },
}

/// Create a provider from configuration
pub async fn create_provider(config: ProviderConfig) -> Result<Box<dyn EthereumProvider>> {
    match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            let provider = ProviderBuilder::new().connect_http(rpc_url);
            Ok(Box::new(AlloyProvider::Http {
                provider,
                endpoint: url,
            }))
        }
        ProviderConfig::WebSocket(url) => {
            let provider = ProviderBuilder::new()
                .connect(&url)
                .await
                .context("Failed to create WebSocket provider")?;
            Ok(Box::new(AlloyProvider::WebSocket {
                provider,
                endpoint: url,
            }))
        }
    }
}

// Macro to reduce code duplication for provider method implementations
macro_rules! impl_provider_method {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        match $self {
            AlloyProvider::Http { provider, .. } => provider.$method($($arg),*).await,
            AlloyProvider::WebSocket { provider, .. } => provider.$method($($arg),*).await,
        }
    };
}

#[async_trait::async_trait]
impl EthereumProvider for AlloyProvider {
    async fn chain_id(&self) -> Result<u64> {
        Ok(impl_provider_method!(self, get_chain_id)?)
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        impl_provider_method!(self, get_balance, address)
            .with_context(|| format!("eth_getBalance failed for {address}"))
    }

    async fn call(&self, request: TransactionRequest) -> Result<Bytes> {
        match self {
            AlloyProvider::Http { provider, .. } => Ok(provider.call(request).await?),
            AlloyProvider::WebSocket { provider, .. } => Ok(provider.call(request).await?),
        }
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        impl_provider_method!(self, get_code_at, address)
            .with_context(|| format!("eth_getCode failed for {address}"))
    }

    fn endpoint_name(&self) -> String {
        match self {
            AlloyProvider::Http { endpoint, .. } => endpoint.clone(),
            AlloyProvider::WebSocket { endpoint, .. } => endpoint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_url() {
        assert_eq!(
            ProviderConfig::from_url("https://mainnet.base.org"),
            ProviderConfig::Http("https://mainnet.base.org".into())
        );
        assert_eq!(
            ProviderConfig::from_url(" wss://base.example/ws "),
            ProviderConfig::WebSocket("wss://base.example/ws".into())
        );
        assert_eq!(
            ProviderConfig::from_url("http://127.0.0.1:8545").display(),
            "http://127.0.0.1:8545"
        );
    }
}
