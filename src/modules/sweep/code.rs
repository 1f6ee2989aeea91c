//! Verified source lookup with deployed-bytecode fallback

use alloy::primitives::Address;
use anyhow::Result;

use crate::domain::CodeInfo;
use crate::infrastructure::ethereum::EthereumProvider;
use crate::infrastructure::explorer::ExplorerClient;

pub async fn fetch_code(
    provider: &dyn EthereumProvider,
    explorer: &dyn ExplorerClient,
    address: Address,
) -> Result<CodeInfo> {
    if let Some(source) = explorer.source_code(address).await? {
        return Ok(CodeInfo::source(source));
    }

    let bytecode = provider.get_code(address).await?;
    Ok(CodeInfo::bytecode(format!("0x{}", hex::encode(&bytecode))))
}
