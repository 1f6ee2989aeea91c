//! contract-sweep: enrich a contract deployment export with balances,
//! token activity and source code.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod modules;
