//! Shared text preprocessing for the analyses.
//!
//! Normalization keeps Unicode word characters (which covers kana and CJK
//! ideographs) and whitespace; everything else becomes a space. English
//! tokenization is whitespace splitting with a stopword list and a minimum
//! token length; Japanese analysis paths rely on substring matching and
//! character segmentation instead, so the same tokenizer is only a rough
//! fallback there.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static EN_SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static JA_SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。．!！?？]+").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Minimum token length kept by [`tokenize`].
pub const MIN_TOKEN_CHARS: usize = 3;

/// Lowercase and replace every non-word character with a space.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    WHITESPACE_RUN.replace_all(replaced.trim(), " ").to_string()
}

/// Normalize, split on whitespace, drop stopwords and short tokens.
pub fn tokenize(text: &str, stopwords: &[String]) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !stopwords.iter().any(|s| s == token))
        .map(|token| token.to_string())
        .collect()
}

/// True when the text contains hiragana, katakana or CJK ideographs.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|c| {
        ('\u{3040}'..='\u{309f}').contains(&c)
            || ('\u{30a0}'..='\u{30ff}').contains(&c)
            || ('\u{4e00}'..='\u{9faf}').contains(&c)
    })
}

/// Split into blank-line-delimited paragraphs, trimmed and non-empty.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Split into sentences on terminal punctuation.
///
/// English splits on `.!?`; Japanese additionally recognizes the fullwidth
/// terminators.
pub fn split_sentences(text: &str, japanese: bool) -> Vec<String> {
    let splitter = if japanese {
        &JA_SENTENCE_SPLIT
    } else {
        &EN_SENTENCE_SPLIT
    };
    splitter
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Count of non-whitespace characters, the Japanese analysis unit.
pub fn char_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stopwords() -> Vec<String> {
        vec!["the".to_string(), "and".to_string()]
    }

    #[test]
    fn test_normalize_strips_punctuation_keeps_japanese() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("リモートワーク、生産性！"), "リモートワーク 生産性");
    }

    #[test]
    fn test_tokenize_filters_stopwords_and_short_tokens() {
        let tokens = tokenize("The team and the tools do work well", &stopwords());
        assert_eq!(tokens, vec!["team", "tools", "work", "well"]);
    }

    #[test]
    fn test_contains_japanese() {
        assert!(contains_japanese("在宅勤務 works"));
        assert!(contains_japanese("カタカナ"));
        assert!(!contains_japanese("plain english"));
    }

    #[test]
    fn test_split_paragraphs_on_blank_lines() {
        let text = "first paragraph\nstill first\n\nsecond\n\n\nthird";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1], "second");
    }

    #[test]
    fn test_split_sentences_english() {
        let sentences = split_sentences("One. Two! Three? ", false);
        assert_eq!(sentences, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_split_sentences_japanese() {
        let sentences = split_sentences("課題です。改善します！次へ？", true);
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_char_count_ignores_whitespace() {
        assert_eq!(char_count("ab c\nd"), 4);
    }
}
