//! Command-line interface definitions.
//!
//! One subcommand per batch job: `scrape` collects and persists the record
//! table, and the `analyze` family runs one exploratory analysis each over
//! a previously written table. All jobs are independent; their only
//! coupling is the CSV named with `--input`.

use clap::{Args, Parser, Subcommand};

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file overriding the built-in
    /// query lists, keyword dictionaries and pacing defaults
    #[arg(short, long, env = "TELEWORK_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape search results and article pages into a record table
    Scrape(ScrapeArgs),

    /// Run one exploratory analysis over a record table
    #[command(subcommand)]
    Analyze(AnalyzeCommand),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Directory the record tables are written into
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Search-result pages per query (defaults to the configured value)
    #[arg(long)]
    pub pages: Option<usize>,

    /// Unique-URL cap per dataset (defaults to the configured value)
    #[arg(long)]
    pub max_articles: Option<usize>,

    /// Collect only the English dataset
    #[arg(long, conflicts_with = "japanese_only")]
    pub english_only: bool,

    /// Collect only the Japanese dataset
    #[arg(long, conflicts_with = "english_only")]
    pub japanese_only: bool,

    /// Additionally write each dataset as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Input table and output directory shared by every analysis.
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Record table to analyze (CSV, or JSON when the extension is .json)
    #[arg(short, long)]
    pub input: String,

    /// Directory the derived tables are written into
    #[arg(short, long, default_value = "data")]
    pub out_dir: String,
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeCommand {
    /// Row counts, missing fields, length distributions, top title terms
    Basic(TableArgs),

    /// Sentiment polarity/subjectivity and solution orientation
    Sentiment(TableArgs),

    /// Content structure and readability metrics
    Structure(TableArgs),

    /// Keyword-dictionary occurrence and factor-category counts
    Keywords(TableArgs),

    /// TF-IDF + LDA topic terms per language
    Topics {
        #[command(flatten)]
        table: TableArgs,

        /// Topics per language
        #[arg(long, default_value_t = 2)]
        topics: usize,

        /// Gibbs sampling sweeps
        #[arg(long, default_value_t = 50)]
        iterations: usize,

        /// RNG seed for reproducible runs
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// K-means clustering over TF-IDF document vectors
    Clusters {
        #[command(flatten)]
        table: TableArgs,

        /// Number of clusters
        #[arg(long, default_value_t = 3)]
        clusters: usize,

        /// RNG seed for reproducible runs
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Per-language word-count statistics and top content terms
    Compare(TableArgs),
}
