//! Side-product table writers for the analysis subcommands.
//!
//! Every analysis writes its derived rows as separate, unlinked CSV files
//! under the chosen output directory; [`tables`] holds the shared writers.

pub mod tables;
