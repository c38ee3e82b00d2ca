//! Per-language comparison of word counts and frequent content terms.

use crate::analysis::basic::top_terms;
use crate::config::RunConfig;
use crate::models::PageRecord;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// One output row of `analyze compare`.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageComparisonRow {
    pub language: String,
    pub records: usize,
    pub word_count_mean: f64,
    pub word_count_median: f64,
    pub word_count_min: usize,
    pub word_count_max: usize,
    pub word_count_std: f64,
    /// Frequent content terms as `term:count`, joined with `; `.
    pub top_terms: String,
}

fn median(sorted: &[usize]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

fn sample_std(values: &[usize], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Group the table by language tag and compare the groups.
pub fn compare(
    records: &[PageRecord],
    config: &RunConfig,
    term_limit: usize,
) -> Vec<LanguageComparisonRow> {
    let mut groups: BTreeMap<&str, Vec<&PageRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.language.as_str()).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(language, group)| {
            let mut word_counts: Vec<usize> = group.iter().map(|r| r.word_count()).collect();
            word_counts.sort_unstable();
            let mean = if word_counts.is_empty() {
                0.0
            } else {
                word_counts.iter().sum::<usize>() as f64 / word_counts.len() as f64
            };

            let stopwords = config.stopwords(language);
            let terms = top_terms(
                group.iter().map(|r| r.content.as_str()),
                stopwords,
                term_limit,
            )
            .into_iter()
            .map(|(term, count)| format!("{term}:{count}"))
            .join("; ");

            LanguageComparisonRow {
                language: language.to_string(),
                records: group.len(),
                word_count_mean: mean,
                word_count_median: median(&word_counts),
                word_count_min: word_counts.first().copied().unwrap_or(0),
                word_count_max: word_counts.last().copied().unwrap_or(0),
                word_count_std: sample_std(&word_counts, mean),
                top_terms: terms,
            }
        })
        .collect()
}
