//! Address validation and EIP-55 checksumming

use std::str::FromStr;

use alloy::primitives::{keccak256, Address};

/// Validate a raw address string and return its canonical form.
///
/// Accepts 40 hex digits with an optional `0x`/`0X` prefix. Mixed-case input
/// must carry a valid EIP-55 checksum; all-lowercase and all-uppercase input is
/// accepted as-is.
pub fn normalize(raw: &str) -> Option<Address> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let lower = body.to_ascii_lowercase();
    if is_mixed_case(body) && &to_checksum_address(&lower)[2..] != body {
        return None;
    }

    Address::from_str(&lower).ok()
}

/// EIP-55 checksummed rendering of an address
pub fn checksummed(address: &Address) -> String {
    to_checksum_address(&hex::encode(address.as_slice()))
}

fn is_mixed_case(body: &str) -> bool {
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    has_lower && has_upper
}

/// `addr` must be 40 lowercase hex chars without prefix
fn to_checksum_address(addr: &str) -> String {
    let hash = keccak256(addr.as_bytes());
    let hash_hex = hex::encode(hash.as_slice());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (c, h) in addr.chars().zip(hash_hex.chars()) {
        if h.to_digit(16).unwrap_or(0) >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}
