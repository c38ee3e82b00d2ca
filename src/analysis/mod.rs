//! Exploratory analyses over a scraped record table.
//!
//! Each submodule backs one `analyze` subcommand. They are independent of
//! one another: every one re-reads the records CSV named on the command
//! line and writes its own side-product tables.
//!
//! | Subcommand | Module | Derives |
//! |------------|--------|---------|
//! | `basic` | [`basic`] | row/missing counts, length stats, top title terms |
//! | `sentiment` | [`sentiment`] | polarity, subjectivity, solution orientation |
//! | `structure` | [`structure`] | headings/paragraphs/lists, Flesch readability |
//! | `keywords` | [`keywords`] | dictionary occurrence and factor-category counts |
//! | `topics` | [`topics`] | TF-IDF vocabulary, LDA topic terms |
//! | `clusters` | [`cluster`] | k-means assignments over TF-IDF vectors |
//! | `compare` | [`compare`] | per-language word-count stats and top terms |
//!
//! [`text`] holds the preprocessing shared by all of them.

pub mod basic;
pub mod cluster;
pub mod compare;
pub mod keywords;
pub mod sentiment;
pub mod structure;
pub mod text;
pub mod topics;
