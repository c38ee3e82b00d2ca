//! Dataset overview: row counts, missing fields, length distributions and
//! frequent title terms.

use crate::analysis::text::tokenize;
use crate::models::PageRecord;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

/// One output row of a top-terms table.
#[derive(Debug, Clone, Serialize)]
pub struct TermCountRow {
    pub term: String,
    pub count: usize,
}

/// Min/mean/max over one derived numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: usize,
    pub mean: f64,
    pub max: usize,
}

impl FieldStats {
    fn from_values(values: &[usize]) -> Self {
        if values.is_empty() {
            return Self {
                min: 0,
                mean: 0.0,
                max: 0,
            };
        }
        Self {
            min: *values.iter().min().unwrap(),
            mean: values.iter().sum::<usize>() as f64 / values.len() as f64,
            max: *values.iter().max().unwrap(),
        }
    }
}

/// Summary of one record table.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicSummary {
    pub rows: usize,
    pub missing_title: usize,
    pub missing_description: usize,
    pub missing_content: usize,
    pub title_length: FieldStats,
    pub content_length: FieldStats,
    pub word_count: FieldStats,
    /// Language tag → record count, most frequent first.
    pub language_counts: Vec<(String, usize)>,
}

/// Compute the dataset overview.
pub fn summarize(records: &[PageRecord]) -> BasicSummary {
    let title_lengths: Vec<usize> = records.iter().map(|r| r.title.chars().count()).collect();
    let content_lengths: Vec<usize> = records.iter().map(|r| r.content.chars().count()).collect();
    let word_counts: Vec<usize> = records.iter().map(|r| r.word_count()).collect();

    let mut languages: HashMap<String, usize> = HashMap::new();
    for record in records {
        *languages.entry(record.language.clone()).or_default() += 1;
    }
    let language_counts = languages
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect();

    BasicSummary {
        rows: records.len(),
        missing_title: records.iter().filter(|r| r.title.trim().is_empty()).count(),
        missing_description: records
            .iter()
            .filter(|r| r.meta_description.trim().is_empty())
            .count(),
        missing_content: records.iter().filter(|r| r.is_empty_content()).count(),
        title_length: FieldStats::from_values(&title_lengths),
        content_length: FieldStats::from_values(&content_lengths),
        word_count: FieldStats::from_values(&word_counts),
        language_counts,
    }
}

/// Most frequent terms across a set of texts, count-descending.
///
/// Ties break alphabetically so the output is stable.
pub fn top_terms<'a, I>(texts: I, stopwords: &[String], limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokenize(text, stopwords) {
            *counts.entry(token).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, content: &str, language: &str) -> PageRecord {
        PageRecord {
            url: format!("https://example.com/{title}"),
            title: title.to_string(),
            meta_description: String::new(),
            content: content.to_string(),
            language: language.to_string(),
            extracted_at: "2025-03-29 16:52:10".to_string(),
        }
    }

    #[test]
    fn test_summarize_counts_missing_fields() {
        let records = vec![
            record("one", "alpha beta gamma", "en"),
            record("", "", "en"),
            record("三", "日本語の内容", "ja"),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.missing_title, 1);
        assert_eq!(summary.missing_description, 3);
        assert_eq!(summary.missing_content, 1);
        assert_eq!(
            summary.language_counts,
            vec![("en".to_string(), 2), ("ja".to_string(), 1)]
        );
        assert_eq!(summary.word_count.max, 3);
    }

    #[test]
    fn test_field_stats_empty_input() {
        let summary = summarize(&[]);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.content_length.mean, 0.0);
    }

    #[test]
    fn test_top_terms_orders_by_count_then_term() {
        let texts = [
            "remote teams need remote tools",
            "remote tools help teams",
        ];
        let terms = top_terms(texts.iter().copied(), &[], 3);
        assert_eq!(terms[0], ("remote".to_string(), 3));
        // "teams" and "tools" tie at 2; alphabetical order breaks it
        assert_eq!(terms[1], ("teams".to_string(), 2));
        assert_eq!(terms[2], ("tools".to_string(), 2));
    }
}
