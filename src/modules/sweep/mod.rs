//! Sweep - per-row contract enrichment
//!
//! Each input row goes through, in order:
//! - address validation (invalid rows are skipped)
//! - native and token balance lookup (rows with both zero are skipped)
//! - Transfer/Approval log classification
//! - verified source or deployed bytecode lookup
//!
//! Rows are handled one at a time in input order. Any RPC or explorer error
//! aborts the whole sweep.

pub mod balance;
pub mod classifier;
pub mod code;

use anyhow::{Context, Result};

use crate::domain::address::{checksummed, normalize};
use crate::domain::{InputRecord, OutputRecord, CODE_TRUNCATE_LEN};
use crate::infrastructure::ethereum::EthereumProvider;
use crate::infrastructure::explorer::ExplorerClient;

pub use balance::{TokenConfig, USDC_BASE, USDC_DECIMALS};
pub use classifier::{TokenActivity, APPROVAL_TOPIC, TRANSFER_TOPIC};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSettings {
    pub token: TokenConfig,
    /// Abort on failed log queries instead of counting them as zero
    pub strict_logs: bool,
    /// Maximum code characters kept in the output
    pub code_len: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            strict_logs: false,
            code_len: CODE_TRUNCATE_LEN,
        }
    }
}

/// What happened to a single input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    InvalidAddress,
    ZeroBalance,
    Emitted(OutputRecord),
}

/// Row counters for one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub rows_read: usize,
    pub invalid_address: usize,
    pub zero_balance: usize,
    pub written: usize,
    pub non_token: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: &RowOutcome) {
        self.rows_read += 1;
        match outcome {
            RowOutcome::InvalidAddress => self.invalid_address += 1,
            RowOutcome::ZeroBalance => self.zero_balance += 1,
            RowOutcome::Emitted(record) => {
                self.written += 1;
                if record.is_non_token {
                    self.non_token += 1;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub records: Vec<OutputRecord>,
    pub summary: SweepSummary,
}

pub struct Sweeper<'a> {
    provider: &'a dyn EthereumProvider,
    explorer: &'a dyn ExplorerClient,
    settings: SweepSettings,
}

impl<'a> Sweeper<'a> {
    pub fn new(
        provider: &'a dyn EthereumProvider,
        explorer: &'a dyn ExplorerClient,
        settings: SweepSettings,
    ) -> Self {
        Self {
            provider,
            explorer,
            settings,
        }
    }

    /// Process every row in order, collecting the qualifying ones
    pub async fn run(&self, rows: &[InputRecord]) -> Result<SweepReport> {
        let mut report = SweepReport::default();

        for (index, row) in rows.iter().enumerate() {
            let outcome = self
                .process_row(row)
                .await
                .with_context(|| format!("row {} ({})", index + 1, row.contract_address))?;

            report.summary.record(&outcome);
            if let RowOutcome::Emitted(record) = outcome {
                report.records.push(record);
            }
        }

        Ok(report)
    }

    pub async fn process_row(&self, row: &InputRecord) -> Result<RowOutcome> {
        let Some(address) = normalize(&row.contract_address) else {
            tracing::debug!(raw = %row.contract_address, "skipping invalid address");
            return Ok(RowOutcome::InvalidAddress);
        };

        let balances =
            balance::fetch_balances(self.provider, &self.settings.token, address).await?;
        if balances.is_empty() {
            tracing::debug!(%address, "skipping contract with zero balances");
            return Ok(RowOutcome::ZeroBalance);
        }

        let activity =
            classifier::classify(self.explorer, address, self.settings.strict_logs).await?;
        let code = code::fetch_code(self.provider, self.explorer, address).await?;

        tracing::info!(
            %address,
            eth = %balances.native,
            token = %balances.token,
            non_token = activity.is_non_token(),
            code_type = code.kind.as_str(),
            "contract qualifies"
        );

        Ok(RowOutcome::Emitted(OutputRecord::build(
            row,
            checksummed(&address),
            &balances,
            activity.is_non_token(),
            code,
            self.settings.code_len,
        )))
    }
}
