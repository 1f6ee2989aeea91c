//! Modules
//!
//! - sweep: per-row validation, balance, classification and code lookup
//! - export: CSV input and output

pub mod export;
pub mod sweep;
