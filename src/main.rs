//! # Telework Corpus
//!
//! A batch CLI that collects remote-work articles from web search engines
//! and runs exploratory text analyses over the scraped corpus.
//!
//! ## Features
//!
//! - Scrapes Bing and DuckDuckGo result pages for a fixed set of English
//!   and Japanese queries, then extracts article content with a selector
//!   fallback chain
//! - Persists scraped records as CSV (UTF-8 with BOM) and JSON tables
//! - Runs independent analyses over a record table: dataset overview,
//!   sentiment and solution orientation, structure and readability,
//!   keyword dictionaries, LDA topics, k-means clusters, and per-language
//!   comparison
//!
//! ## Usage
//!
//! ```sh
//! telework_corpus scrape -d ./data
//! telework_corpus analyze sentiment -i ./data/remote_work_all_data_20250329_165210.csv
//! ```
//!
//! ## Architecture
//!
//! Every subcommand is a self-contained one-shot job:
//! 1. **Scrape**: search → de-duplicate URLs → extract pages → write tables
//! 2. **Analyze**: read a table → derive rows → write side-product CSVs
//!
//! The jobs share no state beyond the tables on disk.

use clap::Parser;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use telework_corpus::analysis::{
    basic, cluster, compare, keywords, sentiment, structure, text, topics,
};
use telework_corpus::cli::{AnalyzeCommand, Cli, Command, ScrapeArgs, TableArgs};
use telework_corpus::config::RunConfig;
use telework_corpus::models::PageRecord;
use telework_corpus::outputs::tables;
use telework_corpus::search::{self, SearchEndpoints};
use telework_corpus::utils::{ensure_writable_dir, timestamp_suffix, truncate_for_log};
use telework_corpus::{dataset, extract, fetch};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    // Optional .env load; no specific keys are required.
    let _ = dotenvy::dotenv();

    let start_time = std::time::Instant::now();
    info!("telework_corpus starting up");

    let args = Cli::parse();
    let config = RunConfig::load(args.config.as_deref().map(Path::new))?;

    match args.command {
        Command::Scrape(scrape_args) => run_scrape(&config, &scrape_args).await?,
        Command::Analyze(analyze_command) => run_analysis(&config, analyze_command).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

// ---- Scrape pipeline ----

async fn run_scrape(config: &RunConfig, args: &ScrapeArgs) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(&args.data_dir).await?;

    let endpoints = SearchEndpoints::default();
    let timestamp = timestamp_suffix();
    let pages = args.pages.unwrap_or(config.pages_per_query);
    let max_articles = args.max_articles.unwrap_or(config.max_articles);

    let mut all_records = Vec::new();

    if !args.japanese_only {
        info!("Collecting the English dataset");
        let records = scrape_dataset(
            config,
            &endpoints,
            config.queries("en"),
            None,
            pages,
            max_articles,
        )
        .await;
        persist_dataset(&records, &args.data_dir, "en", &timestamp, args.json)?;
        all_records.extend(records);
    }

    if !args.english_only {
        info!("Collecting the Japanese dataset");
        let records = scrape_dataset(
            config,
            &endpoints,
            config.queries("ja"),
            Some("ja"),
            pages,
            max_articles,
        )
        .await;
        persist_dataset(&records, &args.data_dir, "ja", &timestamp, args.json)?;
        all_records.extend(records);
    }

    if all_records.is_empty() {
        warn!("No records extracted from any dataset");
        return Ok(());
    }

    let combined_path =
        Path::new(&args.data_dir).join(format!("remote_work_all_data_{timestamp}.csv"));
    dataset::write_records(&all_records, &combined_path)?;
    info!(
        total = all_records.len(),
        path = %combined_path.display(),
        "Wrote combined record table"
    );
    Ok(())
}

/// Collect one language's dataset: search every query, de-duplicate the
/// URLs, then sequentially extract each page with a politeness sleep
/// between fetches. Failed pages are logged and skipped.
async fn scrape_dataset(
    config: &RunConfig,
    endpoints: &SearchEndpoints,
    queries: &[String],
    language: Option<&str>,
    pages: usize,
    max_articles: usize,
) -> Vec<PageRecord> {
    let mut urls = Vec::new();

    for query in queries {
        info!(%query, "Processing search query");
        let hits = search::collect_hits(endpoints, query, pages, language, &config.serp_delay).await;
        info!(%query, count = hits.len(), "Collected URLs from query");
        urls.extend(hits.into_iter().map(|hit| hit.url));

        if dataset::dedup_urls(urls.clone()).len() >= max_articles {
            break;
        }
    }

    let mut unique_urls = dataset::dedup_urls(urls);
    unique_urls.truncate(max_articles);
    info!(count = unique_urls.len(), "Extracting content from unique URLs");

    // One page at a time; the stream is sequential on purpose.
    let records: Vec<PageRecord> = stream::iter(unique_urls.iter())
        .then(|url| async move {
            let result = extract::extract_from_url(url, language, config.min_content_len).await;
            fetch::polite_sleep(&config.fetch_delay).await;
            match result {
                Ok(record) => {
                    info!(
                        %url,
                        content_chars = record.content.chars().count(),
                        language = %record.language,
                        "Extracted content from URL"
                    );
                    debug!(preview = %truncate_for_log(&record.content, 200), "Content preview");
                    Some(record)
                }
                Err(e) => {
                    warn!(%url, error = %e, "Content extraction failed; skipping URL");
                    None
                }
            }
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = records.len(), "Dataset collection complete");
    records
}

fn persist_dataset(
    records: &[PageRecord],
    data_dir: &str,
    language_tag: &str,
    timestamp: &str,
    also_json: bool,
) -> Result<(), Box<dyn Error>> {
    if records.is_empty() {
        warn!(dataset = language_tag, "No records extracted for dataset");
        return Ok(());
    }

    let stem = format!("remote_work_data_{language_tag}_{timestamp}");
    let csv_path = Path::new(data_dir).join(format!("{stem}.csv"));
    dataset::write_records(records, &csv_path)?;
    if also_json {
        let json_path = Path::new(data_dir).join(format!("{stem}.json"));
        dataset::write_records(records, &json_path)?;
    }

    let mean_content_chars = records
        .iter()
        .map(|r| r.content.chars().count())
        .sum::<usize>() as f64
        / records.len() as f64;
    info!(
        dataset = language_tag,
        articles = records.len(),
        mean_content_chars = format!("{mean_content_chars:.0}"),
        "Dataset statistics"
    );
    Ok(())
}

// ---- Analysis dispatch ----

async fn run_analysis(config: &RunConfig, command: AnalyzeCommand) -> Result<(), Box<dyn Error>> {
    match command {
        AnalyzeCommand::Basic(table) => run_basic(config, &table).await,
        AnalyzeCommand::Sentiment(table) => run_sentiment(config, &table).await,
        AnalyzeCommand::Structure(table) => run_structure(&table).await,
        AnalyzeCommand::Keywords(table) => run_keywords(config, &table).await,
        AnalyzeCommand::Topics {
            table,
            topics,
            iterations,
            seed,
        } => run_topics(config, &table, topics, iterations, seed).await,
        AnalyzeCommand::Clusters {
            table,
            clusters,
            seed,
        } => run_clusters(config, &table, clusters, seed).await,
        AnalyzeCommand::Compare(table) => run_compare(config, &table).await,
    }
}

/// Read the input table and make sure the output directory is usable.
async fn load_input(table: &TableArgs) -> Result<Vec<PageRecord>, Box<dyn Error>> {
    ensure_writable_dir(&table.out_dir).await?;
    let records = dataset::read_records(Path::new(&table.input))?;
    if records.is_empty() {
        warn!(input = %table.input, "Record table is empty");
    }
    Ok(records)
}

fn out_path(table: &TableArgs, name: &str) -> PathBuf {
    Path::new(&table.out_dir).join(name)
}

fn mean_of(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Stopword union used when a table mixes languages.
fn combined_stopwords(config: &RunConfig) -> Vec<String> {
    let mut stopwords = config.stopwords_en.clone();
    stopwords.extend(config.stopwords_ja.iter().cloned());
    stopwords
}

async fn run_basic(config: &RunConfig, table: &TableArgs) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let summary = basic::summarize(&records);

    let mut pairs = vec![
        ("rows".to_string(), summary.rows.to_string()),
        ("missing_title".to_string(), summary.missing_title.to_string()),
        (
            "missing_description".to_string(),
            summary.missing_description.to_string(),
        ),
        (
            "missing_content".to_string(),
            summary.missing_content.to_string(),
        ),
        (
            "title_length_min".to_string(),
            summary.title_length.min.to_string(),
        ),
        (
            "title_length_mean".to_string(),
            format!("{:.1}", summary.title_length.mean),
        ),
        (
            "title_length_max".to_string(),
            summary.title_length.max.to_string(),
        ),
        (
            "content_length_min".to_string(),
            summary.content_length.min.to_string(),
        ),
        (
            "content_length_mean".to_string(),
            format!("{:.1}", summary.content_length.mean),
        ),
        (
            "content_length_max".to_string(),
            summary.content_length.max.to_string(),
        ),
        (
            "word_count_min".to_string(),
            summary.word_count.min.to_string(),
        ),
        (
            "word_count_mean".to_string(),
            format!("{:.1}", summary.word_count.mean),
        ),
        (
            "word_count_max".to_string(),
            summary.word_count.max.to_string(),
        ),
    ];
    for (language, count) in &summary.language_counts {
        pairs.push((format!("language_{language}"), count.to_string()));
    }
    tables::write_summary(&out_path(table, "basic_summary.csv"), &pairs)?;

    let stopwords = combined_stopwords(config);
    let term_rows: Vec<basic::TermCountRow> = basic::top_terms(
        records.iter().map(|r| r.title.as_str()),
        &stopwords,
        15,
    )
    .into_iter()
    .map(|(term, count)| basic::TermCountRow { term, count })
    .collect();
    tables::write_rows(&out_path(table, "title_top_terms.csv"), &term_rows)?;

    info!(
        rows = summary.rows,
        mean_content_chars = format!("{:.0}", summary.content_length.mean),
        "Basic analysis complete"
    );
    Ok(())
}

async fn run_sentiment(config: &RunConfig, table: &TableArgs) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let rows = sentiment::analyze(&records, config);
    tables::write_rows(&out_path(table, "sentiment_analysis.csv"), &rows)?;

    info!(
        rows = rows.len(),
        mean_polarity = format!("{:.3}", mean_of(rows.iter().map(|r| r.polarity))),
        mean_subjectivity = format!("{:.3}", mean_of(rows.iter().map(|r| r.subjectivity))),
        mean_solution_score = format!("{:.3}", mean_of(rows.iter().map(|r| r.solution_score))),
        "Sentiment analysis complete"
    );
    Ok(())
}

async fn run_structure(table: &TableArgs) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let (structure_rows, readability_rows) = structure::analyze(&records);
    tables::write_rows(&out_path(table, "structure_analysis.csv"), &structure_rows)?;
    tables::write_rows(
        &out_path(table, "readability_analysis.csv"),
        &readability_rows,
    )?;

    info!(
        rows = structure_rows.len(),
        mean_headings = format!(
            "{:.1}",
            mean_of(structure_rows.iter().map(|r| r.headings as f64))
        ),
        mean_paragraphs = format!(
            "{:.1}",
            mean_of(structure_rows.iter().map(|r| r.paragraphs as f64))
        ),
        mean_reading_ease = format!(
            "{:.1}",
            mean_of(readability_rows.iter().map(|r| r.flesch_reading_ease))
        ),
        "Structure analysis complete"
    );
    Ok(())
}

async fn run_keywords(config: &RunConfig, table: &TableArgs) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let keyword_rows = keywords::keyword_occurrences(&records, &config.keyword_groups);
    let factor_rows = keywords::factor_mentions(&records, &config.factors);
    tables::write_rows(&out_path(table, "keyword_counts.csv"), &keyword_rows)?;
    tables::write_rows(&out_path(table, "factor_counts.csv"), &factor_rows)?;

    info!(
        keywords = keyword_rows.len(),
        total_occurrences = keyword_rows.iter().map(|r| r.occurrences).sum::<usize>(),
        categories = factor_rows.len(),
        "Keyword analysis complete"
    );
    Ok(())
}

async fn run_topics(
    config: &RunConfig,
    table: &TableArgs,
    requested_topics: usize,
    iterations: usize,
    seed: u64,
) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let mut topic_rows: Vec<topics::TopicTermRow> = Vec::new();

    for language in ["en", "ja"] {
        let group: Vec<&PageRecord> = records
            .iter()
            .filter(|r| r.language == language && !r.is_empty_content())
            .collect();
        if group.len() < config.min_docs_for_topics {
            info!(
                language,
                docs = group.len(),
                "Too few documents for topic modeling; skipping language"
            );
            continue;
        }

        let stopwords = config.stopwords(language);
        let docs: Vec<Vec<String>> = group
            .iter()
            .map(|r| text::tokenize(&r.content, stopwords))
            .collect();
        let vocabulary = topics::build_vocabulary(&docs, &config.vectorizer);
        if vocabulary.is_empty() {
            warn!(language, "Vocabulary is empty after cut-offs; skipping language");
            continue;
        }

        // Small groups get fewer topics, one per three documents at most.
        let n_topics = requested_topics.min((group.len() / 3).max(1));
        let fitted = topics::lda_topics(&docs, &vocabulary, n_topics, iterations, seed, 10);

        for (topic_index, topic) in fitted.iter().enumerate() {
            info!(
                language,
                topic = topic_index + 1,
                terms = %topic.terms.iter().map(|(term, _)| term.as_str()).join(", "),
                "Fitted topic"
            );
            for (rank, (term, weight)) in topic.terms.iter().enumerate() {
                topic_rows.push(topics::TopicTermRow {
                    language: language.to_string(),
                    topic: topic_index + 1,
                    rank: rank + 1,
                    term: term.clone(),
                    weight: *weight,
                });
            }
        }
    }

    if topic_rows.is_empty() {
        warn!("No language group had enough documents for topic modeling");
    }
    tables::write_rows(&out_path(table, "topic_terms.csv"), &topic_rows)?;
    Ok(())
}

async fn run_clusters(
    config: &RunConfig,
    table: &TableArgs,
    clusters: usize,
    seed: u64,
) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let group: Vec<&PageRecord> = records.iter().filter(|r| !r.is_empty_content()).collect();
    if group.is_empty() {
        warn!("No records with content to cluster");
        return Ok(());
    }

    let stopwords = combined_stopwords(config);
    let docs: Vec<Vec<String>> = group
        .iter()
        .map(|r| text::tokenize(&r.content, &stopwords))
        .collect();
    let vocabulary = topics::build_vocabulary(&docs, &config.vectorizer);
    let matrix = topics::tfidf_matrix(&docs, &vocabulary);

    let result = cluster::kmeans(&matrix.rows, clusters, 100, seed);
    let fitted_clusters = result.centroids.len();

    let assignment_rows: Vec<cluster::ClusterAssignmentRow> = group
        .iter()
        .zip(&result.assignments)
        .map(|(record, &assigned)| cluster::ClusterAssignmentRow {
            title: record.title.clone(),
            language: record.language.clone(),
            cluster: assigned,
        })
        .collect();
    tables::write_rows(&out_path(table, "cluster_assignments.csv"), &assignment_rows)?;

    let term_sets =
        cluster::top_terms_per_cluster(&matrix, &result.assignments, fitted_clusters, 10);
    let term_rows: Vec<cluster::ClusterTermRow> = term_sets
        .iter()
        .enumerate()
        .flat_map(|(cluster_index, terms)| {
            terms
                .iter()
                .enumerate()
                .map(move |(rank, (term, weight))| cluster::ClusterTermRow {
                    cluster: cluster_index,
                    rank: rank + 1,
                    term: term.clone(),
                    weight: *weight,
                })
        })
        .collect();
    tables::write_rows(&out_path(table, "cluster_terms.csv"), &term_rows)?;

    for cluster_index in 0..fitted_clusters {
        let size = result
            .assignments
            .iter()
            .filter(|&&a| a == cluster_index)
            .count();
        info!(cluster = cluster_index, size, "Cluster size");
    }
    info!(
        documents = group.len(),
        clusters = fitted_clusters,
        "Cluster analysis complete"
    );
    Ok(())
}

async fn run_compare(config: &RunConfig, table: &TableArgs) -> Result<(), Box<dyn Error>> {
    let records = load_input(table).await?;
    let rows = compare::compare(&records, config, 15);
    tables::write_rows(&out_path(table, "language_comparison.csv"), &rows)?;

    for row in &rows {
        info!(
            language = %row.language,
            records = row.records,
            mean_word_count = format!("{:.1}", row.word_count_mean),
            "Language group compared"
        );
    }
    Ok(())
}
