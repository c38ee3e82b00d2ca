//! Data models for scraped pages and search results.
//!
//! This module defines the two data structures that flow through the
//! application:
//! - [`SearchHit`]: one entry parsed out of a search-engine results page
//! - [`PageRecord`]: one scraped article page, the only persistent entity
//!
//! `PageRecord` rows are appended during a scrape run and written once as a
//! table (CSV or JSON). The analysis subcommands re-read those tables and
//! derive their own side-product rows; nothing is ever written back into a
//! record table.

use serde::{Deserialize, Serialize};

/// One result entry parsed from a search-engine results page.
///
/// Hits are transient: only their URLs survive into the extraction phase,
/// after de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The result title text.
    pub title: String,
    /// The linked URL, exactly as present in the result markup.
    pub url: String,
    /// The snippet/description text, empty when the block has none.
    pub snippet: String,
}

/// A scraped page as persisted to the record table.
///
/// Every field is a plain string; `title`, `meta_description` and `content`
/// may be empty when the page did not yield them. `language` is a
/// heuristically guessed tag (`"en"`, `"ja"`, ... or `"unknown"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Source location the content was extracted from.
    pub url: String,
    /// Page `<title>` text, possibly empty.
    pub title: String,
    /// `meta[name="description"]` content attribute, possibly empty.
    pub meta_description: String,
    /// Extracted body text, possibly empty.
    pub content: String,
    /// Guessed language tag.
    pub language: String,
    /// Local timestamp of extraction, `YYYY-MM-DD HH:MM:SS`.
    pub extracted_at: String,
}

impl PageRecord {
    /// Whitespace-separated word count of the body text.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// True when the record carries no usable body text.
    pub fn is_empty_content(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PageRecord {
        PageRecord {
            url: "https://example.com/article".to_string(),
            title: "Remote work and productivity".to_string(),
            meta_description: "A look at distributed teams".to_string(),
            content: "Remote work changes how teams communicate.".to_string(),
            language: "en".to_string(),
            extracted_at: "2025-03-29 16:52:10".to_string(),
        }
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: PageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_word_count() {
        let record = sample_record();
        assert_eq!(record.word_count(), 6);
    }

    #[test]
    fn test_empty_content() {
        let mut record = sample_record();
        record.content = "   \n ".to_string();
        assert!(record.is_empty_content());
        record.content = "text".to_string();
        assert!(!record.is_empty_content());
    }

    #[test]
    fn test_search_hit_equality() {
        let a = SearchHit {
            title: "A".to_string(),
            url: "https://a.example".to_string(),
            snippet: String::new(),
        };
        assert_eq!(a.clone(), a);
    }
}
