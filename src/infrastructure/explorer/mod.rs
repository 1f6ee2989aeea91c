//! Block-explorer infrastructure - Etherscan-compatible HTTP API

mod client;
mod types;

pub use client::{BasescanClient, ExplorerClient, ExplorerError, BASESCAN_API_URL};
pub use types::{ApiResponse, LogQuery, SourceEntry, NO_RECORDS, STATUS_OK};
