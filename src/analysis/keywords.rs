//! Keyword-dictionary occurrence counting and factor-category matching.
//!
//! Occurrence counts are case-insensitive substring counts over a cleaned
//! copy of the content, which handles both Japanese (no whitespace) and
//! multi-word English entries. Factor categories count paragraphs: a
//! paragraph mentions a category when any of its keywords appears in it.

use crate::analysis::text::split_paragraphs;
use crate::config::KeywordGroup;
use crate::models::PageRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// One output row of `analyze keywords`: total occurrences of one keyword.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordCountRow {
    pub group: String,
    pub keyword: String,
    pub occurrences: usize,
}

/// One output row of `analyze keywords`: paragraph mentions per category.
#[derive(Debug, Clone, Serialize)]
pub struct FactorRow {
    pub category: String,
    pub mentions: usize,
}

/// Strip leftover markup fragments and collapse whitespace, lowercased.
pub fn clean_text(text: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(text, " ");
    WHITESPACE_RUN
        .replace_all(without_tags.trim(), " ")
        .to_lowercase()
}

fn count_occurrences(text: &str, keyword: &str) -> usize {
    let keyword = keyword.to_lowercase();
    if keyword.is_empty() {
        return 0;
    }
    text.matches(keyword.as_str()).count()
}

/// Total occurrences of every keyword in every group, across all records.
///
/// Rows within a group are ordered most-frequent first so the table reads
/// like the original's sorted counts.
pub fn keyword_occurrences(
    records: &[PageRecord],
    groups: &[KeywordGroup],
) -> Vec<KeywordCountRow> {
    let cleaned: Vec<String> = records
        .iter()
        .filter(|r| !r.is_empty_content())
        .map(|r| clean_text(&r.content))
        .collect();

    let mut rows = Vec::new();
    for group in groups {
        let mut group_rows: Vec<KeywordCountRow> = group
            .keywords
            .iter()
            .map(|keyword| KeywordCountRow {
                group: group.name.clone(),
                keyword: keyword.clone(),
                occurrences: cleaned
                    .iter()
                    .map(|text| count_occurrences(text, keyword))
                    .sum(),
            })
            .collect();
        group_rows.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        rows.extend(group_rows);
    }
    rows
}

/// Count, per category, the paragraphs mentioning any of its keywords.
pub fn factor_mentions(records: &[PageRecord], factors: &[KeywordGroup]) -> Vec<FactorRow> {
    let mut mentions = vec![0usize; factors.len()];

    for record in records.iter().filter(|r| !r.is_empty_content()) {
        for paragraph in split_paragraphs(&record.content) {
            let paragraph = paragraph.to_lowercase();
            for (i, factor) in factors.iter().enumerate() {
                if factor
                    .keywords
                    .iter()
                    .any(|keyword| paragraph.contains(&keyword.to_lowercase()))
                {
                    mentions[i] += 1;
                }
            }
        }
    }

    factors
        .iter()
        .zip(mentions)
        .map(|(factor, count)| FactorRow {
            category: factor.name.clone(),
            mentions: count,
        })
        .collect()
}
