//! Export Module
//!
//! CSV input/output for a sweep.

mod csv_export;

pub use csv_export::{
    read_contracts, read_contracts_from, write_results, write_results_to, OUTPUT_HEADERS,
};
