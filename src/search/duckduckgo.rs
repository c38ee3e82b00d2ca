//! DuckDuckGo HTML results-page parser.
//!
//! The `html.duckduckgo.com`-style endpoint renders results as `.result`
//! blocks with `.result__title` / `.result__snippet` children. Links are
//! taken as-is from the anchor, which for DuckDuckGo may be a redirect URL.

use crate::models::SearchHit;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".result").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".result__title").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".result__title a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__snippet").unwrap());

/// Extract `(title, url, snippet)` triples from a DuckDuckGo HTML page.
///
/// Same skip policy as the Bing parser: no title or no link drops the
/// block, no snippet yields an empty string.
pub fn parse_results(html: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let mut hits = Vec::new();

    for result in document.select(&RESULT_SELECTOR) {
        let Some(title_element) = result.select(&TITLE_SELECTOR).next() else {
            continue;
        };
        let title = title_element.text().collect::<String>().trim().to_string();

        let Some(href) = result
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|link| link.value().attr("href"))
        else {
            continue;
        };

        let snippet = result
            .select(&SNIPPET_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit {
            title,
            url: href.to_string(),
            snippet,
        });
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_result_blocks() {
        let html = r#"
            <div class="result">
                <h2 class="result__title"><a href="https://x.example/a">Alpha</a></h2>
                <a class="result__snippet">About alpha</a>
            </div>
            <div class="result">
                <span class="result__snippet">title missing</span>
            </div>
        "#;
        let hits = parse_results(html);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Alpha");
        assert_eq!(hits[0].url, "https://x.example/a");
        assert_eq!(hits[0].snippet, "About alpha");
    }

    #[test]
    fn test_empty_page_yields_no_hits() {
        assert!(parse_results("<html></html>").is_empty());
    }
}
