//! Etherscan-compatible response envelopes

use serde::Deserialize;

/// `status` value of a successful call
pub const STATUS_OK: &str = "1";

/// `message` returned alongside an empty log search
pub const NO_RECORDS: &str = "No records found";

/// Common `{status, message, result}` envelope.
///
/// `result` stays untyped: on failure the explorer puts an error string there
/// instead of the usual array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Human readable failure reason (`message`, plus `result` when it is a string)
    pub fn failure_reason(&self) -> String {
        match self.result.as_str() {
            Some(detail) if !detail.is_empty() => format!("{}: {}", self.message, detail),
            _ => self.message.clone(),
        }
    }
}

/// Single entry of a `getsourcecode` result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceEntry {
    #[serde(rename = "SourceCode", default)]
    pub source_code: String,
}

/// Outcome of a `getLogs` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogQuery {
    /// Successful search, with the number of matching entries
    Found(usize),
    /// The explorer reported no matching logs
    NoRecords,
    /// Non-success status other than an empty search
    Failed(String),
}

impl LogQuery {
    /// Matching entries, counting any failure as zero
    pub fn count(&self) -> usize {
        match self {
            LogQuery::Found(n) => *n,
            LogQuery::NoRecords | LogQuery::Failed(_) => 0,
        }
    }
}
