//! Library surface of the telework corpus tools.
//!
//! The binary in `main.rs` wires these modules into the `scrape` and
//! `analyze` subcommands; integration tests exercise them directly.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod search;
pub mod utils;
