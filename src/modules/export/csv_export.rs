//! CSV Export
//!
//! Reads the contract deployment export and writes the analysis file.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{InputRecord, OutputRecord};

/// Column order of the analysis file
pub const OUTPUT_HEADERS: [&str; 9] = [
    "contract_address",
    "block_time",
    "tx_hash",
    "creator_address",
    "eth_balance",
    "usdc_balance",
    "is_non_token",
    "code_type",
    "code",
];

/// Read contract rows from a CSV file
pub fn read_contracts(path: &Path) -> Result<Vec<InputRecord>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("open input {}", path.display()))?;
    read_contracts_from(file).with_context(|| format!("read input {}", path.display()))
}

pub fn read_contracts_from<R: Read>(reader: R) -> Result<Vec<InputRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in rdr.deserialize().enumerate() {
        let row: InputRecord = record.with_context(|| format!("malformed row {}", index + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write analysis rows to a CSV file
pub fn write_results(path: &Path, records: &[OutputRecord]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create output {}", path.display()))?;
    write_results_to(file, records).with_context(|| format!("write output {}", path.display()))
}

pub fn write_results_to<W: Write>(writer: W, records: &[OutputRecord]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // Header is written even when nothing qualified
    wtr.write_record(OUTPUT_HEADERS)?;

    // Write data rows
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(records.len())
}
