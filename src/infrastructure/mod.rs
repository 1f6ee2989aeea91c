//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Alloy-based Ethereum provider implementations
//! - Etherscan-compatible block-explorer client

pub mod ethereum;
pub mod explorer;

pub use ethereum::{create_provider, EthereumProvider, ProviderConfig};
pub use explorer::{BasescanClient, ExplorerClient, ExplorerError};
