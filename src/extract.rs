//! Per-page content extraction.
//!
//! This is the reusable core of the pipeline: given a page's HTML, pull out
//! the title, the meta description and the body text, guess the language,
//! and stamp the extraction time.
//!
//! # Selector fallback chain
//!
//! The body is located with an ordered list of extraction strategies tried
//! in sequence, first non-trivial result wins:
//!
//! 1. A prioritized list of common content selectors (`article`, `main`,
//!    `.post-content`, ...) — the first one that matches supplies the text.
//! 2. When nothing matched, or the matched text is shorter than the
//!    configured minimum, the text of every `<p>` tag is concatenated.
//!
//! Pages where neither strategy finds anything yield a record with empty
//! `content` rather than an error; only the network layer can fail.

use crate::fetch::{fetch_html, FetchError};
use crate::models::PageRecord;
use chrono::Local;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use whatlang::Lang;

/// Prioritized body selectors, common article/content class names first.
pub const CONTENT_SELECTOR_NAMES: &[&str] = &[
    "article",
    "main",
    ".post-content",
    ".entry-content",
    "#content",
    ".article-body",
    ".blog-content",
];

static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    CONTENT_SELECTOR_NAMES
        .iter()
        .map(|name| Selector::parse(name).unwrap())
        .collect()
});
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META_DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

const LANGUAGE_MIN_TEXT_LEN: usize = 50;
const LANGUAGE_MIN_CONFIDENCE: f64 = 0.25;

/// Build a [`PageRecord`] from a page's HTML.
///
/// Pure function over the markup; never fails. `min_content_len` is the
/// threshold below which the selector-chain result is discarded in favor of
/// the paragraph fallback.
pub fn extract_record(url: &str, html: &str, min_content_len: usize) -> PageRecord {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let meta_description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let content = extract_body(&document, min_content_len);
    let language = guess_language(&content);

    PageRecord {
        url: url.to_string(),
        title,
        meta_description,
        language,
        extracted_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        content,
    }
}

/// Fetch a URL and extract its record.
///
/// # Errors
///
/// Propagates the [`FetchError`] classification from the network layer;
/// extraction itself cannot fail.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract_from_url(
    url: &str,
    language: Option<&str>,
    min_content_len: usize,
) -> Result<PageRecord, FetchError> {
    let html = fetch_html(url, language).await?;
    let record = extract_record(url, &html, min_content_len);
    debug!(
        content_chars = record.content.chars().count(),
        language = %record.language,
        "Extracted page record"
    );
    Ok(record)
}

/// Run the selector fallback chain over a parsed document.
fn extract_body(document: &Html, min_content_len: usize) -> String {
    let mut content = String::new();
    for selector in CONTENT_SELECTORS.iter() {
        if let Some(element) = document.select(selector).next() {
            content = element
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            break;
        }
    }

    // Too-short matches also fall through to the paragraph concatenation.
    if content.chars().count() < min_content_len {
        let paragraphs = document
            .select(&PARAGRAPH_SELECTOR)
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        if !paragraphs.is_empty() {
            content = paragraphs.join("\n");
        }
    }

    content
}

/// Guess the language tag of extracted text.
///
/// Returns `"unknown"` for text that is too short or detected with too
/// little confidence.
pub fn guess_language(text: &str) -> String {
    if text.trim().len() < LANGUAGE_MIN_TEXT_LEN {
        return "unknown".to_string();
    }
    match whatlang::detect(text) {
        Some(info) if info.confidence() >= LANGUAGE_MIN_CONFIDENCE => lang_to_code(info.lang()),
        _ => "unknown".to_string(),
    }
}

fn lang_to_code(lang: Lang) -> String {
    match lang {
        Lang::Eng => "en".to_string(),
        Lang::Jpn => "ja".to_string(),
        Lang::Cmn => "zh".to_string(),
        Lang::Kor => "ko".to_string(),
        Lang::Spa => "es".to_string(),
        Lang::Fra => "fr".to_string(),
        Lang::Deu => "de".to_string(),
        Lang::Por => "pt".to_string(),
        Lang::Rus => "ru".to_string(),
        Lang::Ita => "it".to_string(),
        _ => format!("{lang:?}").to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_fallback_contains_text() {
        let html = "<html><body><div><p>remote work is here to stay</p></div></body></html>";
        let record = extract_record("https://x.example", html, 100);
        assert!(record.content.contains("remote work is here to stay"));
    }

    #[test]
    fn test_no_selectors_no_paragraphs_yields_empty_content() {
        let html = "<html><body><div>bare text only</div></body></html>";
        let record = extract_record("https://x.example", html, 100);
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_first_matching_selector_wins() {
        let body = "article body ".repeat(20);
        let html = format!(
            "<html><body><article>{body}</article><main>main body that should lose</main></body></html>"
        );
        let record = extract_record("https://x.example", &html, 100);
        assert!(record.content.contains("article body"));
        assert!(!record.content.contains("main body"));
    }

    #[test]
    fn test_short_selector_match_falls_back_to_paragraphs() {
        let filler = "long paragraph content ".repeat(10);
        let html = format!(
            "<html><body><article>tiny</article><p>{filler}</p></body></html>"
        );
        let record = extract_record("https://x.example", &html, 100);
        assert!(record.content.contains("long paragraph content"));
    }

    #[test]
    fn test_title_and_meta_description() {
        let html = r#"<html><head><title> Remote Work Guide </title>
            <meta name="description" content="How teams stay productive">
            </head><body><p>body</p></body></html>"#;
        let record = extract_record("https://x.example", html, 100);
        assert_eq!(record.title, "Remote Work Guide");
        assert_eq!(record.meta_description, "How teams stay productive");
    }

    #[test]
    fn test_missing_title_is_empty_not_error() {
        let record = extract_record("https://x.example", "<html><body></body></html>", 100);
        assert_eq!(record.title, "");
        assert_eq!(record.meta_description, "");
    }

    #[test]
    fn test_language_guess_english() {
        let text = "Remote work lets teams collaborate across time zones while keeping focus. \
                    Many companies report productivity gains after adopting flexible schedules.";
        assert_eq!(guess_language(text), "en");
    }

    #[test]
    fn test_language_guess_japanese() {
        let text = "リモートワークはチームの生産性とコミュニケーションに大きな影響を与えます。\
                    多くの企業が柔軟な働き方を導入し、時間管理の改善に取り組んでいます。";
        assert_eq!(guess_language(text), "ja");
    }

    #[test]
    fn test_language_guess_short_text_unknown() {
        assert_eq!(guess_language("short"), "unknown");
    }
}
