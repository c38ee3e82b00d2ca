//! Bing results-page parser.
//!
//! Bing lists organic results as `li.b_algo` blocks; the title lives in an
//! `h2`, the link in `h2 a`, and the snippet in the first `p`. The
//! selectors are tied to Bing's current page structure and are expected to
//! rot; a block that no longer matches simply contributes nothing.

use crate::models::SearchHit;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li.b_algo").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h2 a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Extract `(title, url, snippet)` triples from a Bing results page.
///
/// A block missing its title or link element is skipped; a missing snippet
/// yields an empty string.
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

    const SERP: &str = r#"
        <html><body><ol>
            <li class="b_algo">
                <h2><a href="https://a.example/post">A</a></h2>
                <p>First snippet</p>
            </li>
            <li class="b_algo">
                <div class="no-title">orphan block</div>
            </li>
            <li class="b_algo">
                <h2><a href="https://b.example/page">B</a></h2>
            </li>
        </ol></body></html>
    "#;

    #[test]
    fn test_malformed_block_is_skipped() {
        let hits = parse_results(SERP);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "A");
        assert_eq!(hits[0].url, "https://a.example/post");
        assert_eq!(hits[0].snippet, "First snippet");
        assert_eq!(hits[1].title, "B");
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn test_title_without_link_is_skipped() {
        let html = r#"<li class="b_algo"><h2>No anchor here</h2></li>"#;
        assert!(parse_results(html).is_empty());
    }

    #[test]
    fn test_empty_page_yields_no_hits() {
        assert!(parse_results("<html><body></body></html>").is_empty());
    }
}
