//! Domain types - addresses, amounts and sweep rows

pub mod address;
pub mod record;
pub mod units;

pub use record::{
    truncate_code, BalanceSnapshot, CodeInfo, CodeType, InputRecord, OutputRecord,
    CODE_TRUNCATE_LEN,
};
pub use units::{format_units, Amount, MAX_DECIMALS, NATIVE_DECIMALS};
