//! Token-behavior classification from Transfer/Approval logs

use alloy::primitives::{b256, Address, B256};

use crate::infrastructure::explorer::{ExplorerClient, ExplorerError, LogQuery};

/// keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// keccak256("Approval(address,address,uint256)")
pub const APPROVAL_TOPIC: B256 =
    b256!("8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925");

/// Transfer and Approval log counts of one contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenActivity {
    pub transfers: usize,
    pub approvals: usize,
}

impl TokenActivity {
    /// No Transfer or Approval event was ever emitted
    pub fn is_non_token(&self) -> bool {
        self.transfers + self.approvals == 0
    }
}

/// Count Transfer and Approval logs emitted by `address`.
///
/// A failed log query counts as zero entries, unless `strict` is set, in
/// which case it aborts with [`ExplorerError::ApiFailure`].
pub async fn classify(
    explorer: &dyn ExplorerClient,
    address: Address,
    strict: bool,
) -> Result<TokenActivity, ExplorerError> {
    let transfers = count_logs(explorer, address, TRANSFER_TOPIC, strict).await?;
    let approvals = count_logs(explorer, address, APPROVAL_TOPIC, strict).await?;
    Ok(TokenActivity {
        transfers,
        approvals,
    })
}

async fn count_logs(
    explorer: &dyn ExplorerClient,
    address: Address,
    topic0: B256,
    strict: bool,
) -> Result<usize, ExplorerError> {
    let query = explorer.logs(address, topic0).await?;
    if let LogQuery::Failed(reason) = &query {
        if strict {
            return Err(ExplorerError::ApiFailure {
                action: "getLogs",
                address: address.to_string(),
                reason: reason.clone(),
            });
        }
        tracing::warn!(%address, %topic0, %reason, "log query failed, counting as zero");
    }
    Ok(query.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, keccak256};
    use std::collections::HashMap;

    struct FakeLogs(HashMap<B256, LogQuery>);

    #[async_trait::async_trait]
    impl ExplorerClient for FakeLogs {
        async fn source_code(&self, _address: Address) -> Result<Option<String>, ExplorerError> {
            Ok(None)
        }

        async fn logs(&self, _address: Address, topic0: B256) -> Result<LogQuery, ExplorerError> {
            Ok(self.0.get(&topic0).cloned().unwrap_or(LogQuery::NoRecords))
        }
    }

    const CONTRACT: Address = address!("fb6916095ca1df60bb79ce92ce3ea74c37c5d359");

    #[test]
    fn test_topics_match_event_signatures() {
        assert_eq!(TRANSFER_TOPIC, keccak256("Transfer(address,address,uint256)"));
        assert_eq!(APPROVAL_TOPIC, keccak256("Approval(address,address,uint256)"));
    }

    #[tokio::test]
    async fn test_no_logs_is_non_token() {
        let explorer = FakeLogs(HashMap::new());
        let activity = classify(&explorer, CONTRACT, false).await.unwrap();
        assert!(activity.is_non_token());
    }

    #[tokio::test]
    async fn test_approvals_only_is_token() {
        let explorer = FakeLogs(HashMap::from([(APPROVAL_TOPIC, LogQuery::Found(1))]));
        let activity = classify(&explorer, CONTRACT, false).await.unwrap();
        assert_eq!(
            activity,
            TokenActivity {
                transfers: 0,
                approvals: 1
            }
        );
        assert!(!activity.is_non_token());
    }

    #[tokio::test]
    async fn test_failure_counts_as_zero() {
        let explorer = FakeLogs(HashMap::from([
            (TRANSFER_TOPIC, LogQuery::Failed("NOTOK".into())),
            (APPROVAL_TOPIC, LogQuery::Failed("NOTOK".into())),
        ]));
        let activity = classify(&explorer, CONTRACT, false).await.unwrap();
        assert!(activity.is_non_token());
    }

    #[tokio::test]
    async fn test_strict_failure_is_error() {
        let explorer = FakeLogs(HashMap::from([(
            APPROVAL_TOPIC,
            LogQuery::Failed("NOTOK: Max rate limit reached".into()),
        )]));
        let err = classify(&explorer, CONTRACT, true).await.unwrap_err();
        assert!(matches!(err, ExplorerError::ApiFailure { action: "getLogs", .. }));
    }

    #[tokio::test]
    async fn test_strict_no_records_is_zero() {
        let explorer = FakeLogs(HashMap::from([(TRANSFER_TOPIC, LogQuery::NoRecords)]));
        let activity = classify(&explorer, CONTRACT, true).await.unwrap();
        assert!(activity.is_non_token());
    }
}
