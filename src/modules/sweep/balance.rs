//! Native and token balance lookups

use alloy::primitives::{address, Address, U256};
use alloy::rpc::types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use anyhow::{Context, Result};

use crate::domain::{Amount, BalanceSnapshot};
use crate::infrastructure::ethereum::EthereumProvider;

/// USDC on Base
pub const USDC_BASE: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// USDC decimals
pub const USDC_DECIMALS: u8 = 6;

sol! {
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Fungible token whose balance is checked for every contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConfig {
    pub address: Address,
    pub decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            address: USDC_BASE,
            decimals: USDC_DECIMALS,
        }
    }
}

/// Fetch the native balance and the token balance of `owner`
pub async fn fetch_balances(
    provider: &dyn EthereumProvider,
    token: &TokenConfig,
    owner: Address,
) -> Result<BalanceSnapshot> {
    let wei = provider.get_balance(owner).await?;
    let units = fetch_token_balance(provider, token.address, owner).await?;

    Ok(BalanceSnapshot {
        native: Amount::native(wei),
        token: Amount::new(units, token.decimals),
    })
}

async fn fetch_token_balance(
    provider: &dyn EthereumProvider,
    token: Address,
    owner: Address,
) -> Result<U256> {
    let request = TransactionRequest::default()
        .to(token)
        .input(encode_balance_of(owner).into());

    let data = provider
        .call(request)
        .await
        .with_context(|| format!("balanceOf({owner}) on {token} failed"))?;

    decode_uint256(&data).with_context(|| {
        format!("balanceOf({owner}) on {token} returned {} bytes", data.len())
    })
}

/// Encode balanceOf(address) call
fn encode_balance_of(owner: Address) -> Vec<u8> {
    IERC20::balanceOfCall { owner }.abi_encode()
}

fn decode_uint256(data: &[u8]) -> Result<U256> {
    if data.len() < 32 {
        anyhow::bail!("return data shorter than one word");
    }
    Ok(U256::from_be_slice(&data[..32]))
}
