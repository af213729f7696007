//! vehicle-ledger: browse, summarize and export vehicle running costs.
//!
//! The pure engines live in `table` (search, filter and sort), `reveal` (incremental paging),
//! `currency` (per-currency totals and conversion) and `export` (CSV). The `commands` module wires
//! them to the ledger file for the `vledger` binary.

pub mod args;
pub mod commands;
mod config;
pub mod currency;
mod error;
pub mod export;
pub mod i18n;
pub mod model;
pub mod reveal;
pub mod source;
pub mod table;
mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
