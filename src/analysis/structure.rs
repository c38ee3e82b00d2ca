//! Content structure and readability metrics.
//!
//! Structure counts heading-like lines, blank-line-delimited paragraphs and
//! bullet list items, with per-language heuristics for what a heading looks
//! like. Readability computes Flesch Reading Ease and Flesch-Kincaid Grade
//! for English (with vowel-group syllable estimation) and
//! characters-per-sentence for Japanese.

use crate::analysis::text::{contains_japanese, split_paragraphs, split_sentences};
use crate::models::PageRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EN_NUMBERED_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s").unwrap());
static JA_NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d１２３４５６７８９０]+[.．、]").unwrap());
static JA_BRACKET_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^【.+】$").unwrap());
static JA_MARKER_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[■●◆].+").unwrap());
static EN_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[\-\*•]\s+").unwrap());
static JA_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[・※◎○●■□▲△▼▽◆◇★☆→①②③④⑤⑥⑦⑧⑨⑩]+\s+").unwrap());

/// Structural element counts for one text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StructureMetrics {
    pub headings: usize,
    pub paragraphs: usize,
    pub list_items: usize,
    pub avg_paragraph_length: f64,
}

/// Readability metrics for one text.
///
/// The Flesch fields stay zero for Japanese text, where the formulas do not
/// apply; `chars_per_sentence` is the Japanese-oriented measure and is
/// filled for both languages.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadabilityMetrics {
    pub sentence_count: usize,
    pub avg_sentence_words: f64,
    pub chars_per_sentence: f64,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
}

/// One output row of `analyze structure` (structural part).
#[derive(Debug, Clone, Serialize)]
pub struct StructureRow {
    pub title: String,
    pub language: String,
    pub headings: usize,
    pub paragraphs: usize,
    pub list_items: usize,
    pub avg_paragraph_length: f64,
}

/// One output row of `analyze structure` (readability part).
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityRow {
    pub title: String,
    pub language: String,
    pub sentence_count: usize,
    pub avg_sentence_words: f64,
    pub chars_per_sentence: f64,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
}

fn is_heading_en(line: &str) -> bool {
    let chars = line.chars().count();
    if chars == 0 || chars >= 100 {
        return false;
    }
    let uppercase = line.chars().filter(|c| c.is_uppercase()).count();
    uppercase as f64 / chars as f64 > 0.5 || EN_NUMBERED_HEADING.is_match(line)
}

fn is_heading_ja(line: &str) -> bool {
    let chars = line.chars().count();
    if chars == 0 || chars >= 50 {
        return false;
    }
    line.ends_with("とは")
        || line.ends_with("について")
        || JA_NUMBERED_HEADING.is_match(line)
        || JA_BRACKET_HEADING.is_match(line)
        || JA_MARKER_HEADING.is_match(line)
}

/// Count structural elements of a text.
pub fn analyze_structure(text: &str, japanese: bool) -> StructureMetrics {
    if text.trim().is_empty() {
        return StructureMetrics::default();
    }

    let headings = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            if japanese {
                is_heading_ja(line)
            } else {
                is_heading_en(line)
            }
        })
        .count();

    let paragraphs = split_paragraphs(text);
    let avg_paragraph_length = if paragraphs.is_empty() {
        0.0
    } else {
        paragraphs
            .iter()
            .map(|p| p.chars().count())
            .sum::<usize>() as f64
            / paragraphs.len() as f64
    };

    let list_pattern = if japanese { &JA_LIST_ITEM } else { &EN_LIST_ITEM };
    let list_items = list_pattern.find_iter(text).count();

    StructureMetrics {
        headings,
        paragraphs: paragraphs.len(),
        list_items,
        avg_paragraph_length,
    }
}

/// Estimate the syllable count of an English word by vowel groups.
///
/// Words of three letters or fewer count as one syllable; a trailing `e` is
/// dropped unless a consonant-`le` ending restores it; the minimum is one.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| "aeiouy".contains(c);
    let mut count = 0usize;
    let mut previous_was_vowel = false;
    for &c in &chars {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }
    if word.ends_with("le") && chars.len() > 2 && !is_vowel(chars[chars.len() - 3]) {
        count += 1;
    }
    count.max(1)
}

/// Compute readability metrics for a text.
pub fn analyze_readability(text: &str, japanese: bool) -> ReadabilityMetrics {
    if text.trim().is_empty() {
        return ReadabilityMetrics::default();
    }

    let sentences = split_sentences(text, japanese);
    if sentences.is_empty() {
        return ReadabilityMetrics::default();
    }
    let sentence_count = sentences.len();

    let chars_per_sentence = sentences
        .iter()
        .map(|s| s.chars().count())
        .sum::<usize>() as f64
        / sentence_count as f64;

    if japanese {
        return ReadabilityMetrics {
            sentence_count,
            avg_sentence_words: 0.0,
            chars_per_sentence,
            flesch_reading_ease: 0.0,
            flesch_kincaid_grade: 0.0,
        };
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let avg_sentence_words = sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .sum::<usize>() as f64
        / sentence_count as f64;

    if word_count == 0 {
        return ReadabilityMetrics {
            sentence_count,
            avg_sentence_words,
            chars_per_sentence,
            flesch_reading_ease: 0.0,
            flesch_kincaid_grade: 0.0,
        };
    }

    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();
    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;

    ReadabilityMetrics {
        sentence_count,
        avg_sentence_words,
        chars_per_sentence,
        flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        flesch_kincaid_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
    }
}

/// Analyze every record with usable content.
pub fn analyze(records: &[PageRecord]) -> (Vec<StructureRow>, Vec<ReadabilityRow>) {
    let mut structure_rows = Vec::new();
    let mut readability_rows = Vec::new();

    for record in records.iter().filter(|r| !r.is_empty_content()) {
        let japanese = record.language == "ja" || contains_japanese(&record.content);
        let structure = analyze_structure(&record.content, japanese);
        let readability = analyze_readability(&record.content, japanese);

        structure_rows.push(StructureRow {
            title: record.title.clone(),
            language: record.language.clone(),
            headings: structure.headings,
            paragraphs: structure.paragraphs,
            list_items: structure.list_items,
            avg_paragraph_length: structure.avg_paragraph_length,
        });
        readability_rows.push(ReadabilityRow {
            title: record.title.clone(),
            language: record.language.clone(),
            sentence_count: readability.sentence_count,
            avg_sentence_words: readability.avg_sentence_words,
            chars_per_sentence: readability.chars_per_sentence,
            flesch_reading_ease: readability.flesch_reading_ease,
            flesch_kincaid_grade: readability.flesch_kincaid_grade,
        });
    }

    (structure_rows, readability_rows)
}
