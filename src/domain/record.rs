//! Input/output row types for a sweep

use serde::{Deserialize, Serialize};

use super::units::Amount;

/// Default maximum number of code characters kept in the output
pub const CODE_TRUNCATE_LEN: usize = 100;

const ELLIPSIS: &str = "...";

/// A row of the contract deployment export
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    pub contract_address: String,
    pub block_time: String,
    pub tx_hash: String,
    pub creator_address: String,
}

/// Native and token balances of one contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub native: Amount,
    pub token: Amount,
}

impl BalanceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.native.is_zero() && self.token.is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeType {
    /// Verified source listing from the explorer
    Source,
    /// Deployed bytecode from the chain node
    Bytecode,
}

impl CodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Source => "source",
            CodeType::Bytecode => "bytecode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeInfo {
    pub kind: CodeType,
    pub code: String,
}

impl CodeInfo {
    pub fn source(code: impl Into<String>) -> Self {
        Self {
            kind: CodeType::Source,
            code: code.into(),
        }
    }

    pub fn bytecode(code: impl Into<String>) -> Self {
        Self {
            kind: CodeType::Bytecode,
            code: code.into(),
        }
    }
}

/// A qualifying contract, as written to the analysis file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub contract_address: String,
    pub block_time: String,
    pub tx_hash: String,
    pub creator_address: String,
    pub eth_balance: String,
    pub usdc_balance: String,
    pub is_non_token: bool,
    pub code_type: CodeType,
    pub code: String,
}

impl OutputRecord {
    pub fn build(
        input: &InputRecord,
        checksummed_address: String,
        balances: &BalanceSnapshot,
        is_non_token: bool,
        code: CodeInfo,
        max_code_len: usize,
    ) -> Self {
        Self {
            contract_address: checksummed_address,
            block_time: input.block_time.clone(),
            tx_hash: input.tx_hash.clone(),
            creator_address: input.creator_address.clone(),
            eth_balance: balances.native.to_string(),
            usdc_balance: balances.token.to_string(),
            is_non_token,
            code_type: code.kind,
            code: truncate_code(&code.code, max_code_len),
        }
    }
}

/// Keep the first `max` characters, marking the cut with `...`
pub fn truncate_code(code: &str, max: usize) -> String {
    match code.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &code[..cut], ELLIPSIS),
        None => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_truncate_short_code_unchanged() {
        assert_eq!(truncate_code("0x6080", CODE_TRUNCATE_LEN), "0x6080");
        assert_eq!(truncate_code("", CODE_TRUNCATE_LEN), "");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let code = "a".repeat(100);
        assert_eq!(truncate_code(&code, CODE_TRUNCATE_LEN), code);
    }

    #[test]
    fn test_truncate_long_code() {
        let code = "b".repeat(101);
        let out = truncate_code(&code, CODE_TRUNCATE_LEN);
        assert_eq!(out.len(), 103);
        assert_eq!(out, format!("{}...", "b".repeat(100)));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let code = "é".repeat(120);
        let out = truncate_code(&code, CODE_TRUNCATE_LEN);
        assert_eq!(out.chars().count(), 103);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_snapshot_is_empty() {
        let zero = BalanceSnapshot {
            native: Amount::native(U256::ZERO),
            token: Amount::new(U256::ZERO, 6),
        };
        assert!(zero.is_empty());

        let dust = BalanceSnapshot {
            native: Amount::native(U256::ZERO),
            token: Amount::new(U256::from(1u64), 6),
        };
        assert!(!dust.is_empty());
    }
}
