//! Search-engine result retrieval.
//!
//! This module contains one submodule per supported search engine. Each
//! submodule exports a single `parse_results()` function that turns a
//! results page into [`SearchHit`]s; the page loop, engine selection and
//! failure policy live here in [`collect_hits`].
//!
//! # Supported engines
//!
//! | Engine | Module | Pagination | Result selectors |
//! |--------|--------|------------|------------------|
//! | Bing | [`bing`] | numeric `first` offset, 10/page | `li.b_algo`, `h2`, `h2 a`, `p` |
//! | DuckDuckGo HTML | [`duckduckgo`] | none honored | `.result`, `.result__title`, `.result__snippet` |
//!
//! # Failure policy
//!
//! The engine for a run is chosen at random. A page that fails to fetch
//! (transport error or non-success status) contributes zero results and
//! switches the remainder of the run to the alternate engine; a result
//! block missing its title or link element is skipped silently.

pub mod bing;
pub mod duckduckgo;

use crate::config::DelayRange;
use crate::fetch::{fetch_html, polite_sleep};
use crate::models::SearchHit;
use rand::Rng;
use tracing::{info, instrument, warn};

/// Base URLs for the two engines.
///
/// Overridable so tests can point the page loop at a mock server; the
/// defaults target the live engines.
#[derive(Debug, Clone)]
pub struct SearchEndpoints {
    pub bing: String,
    pub duckduckgo: String,
}

impl Default for SearchEndpoints {
    fn default() -> Self {
        Self {
            bing: "https://www.bing.com".to_string(),
            duckduckgo: "https://duckduckgo.com".to_string(),
        }
    }
}

/// The two hard-coded search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Bing,
    DuckDuckGo,
}

impl Engine {
    /// Random engine pick for the start of a run.
    pub fn pick_random() -> Self {
        if rand::rng().random_range(0..2) == 0 {
            Engine::Bing
        } else {
            Engine::DuckDuckGo
        }
    }

    /// The alternate engine, used after a page failure.
    pub fn other(self) -> Self {
        match self {
            Engine::Bing => Engine::DuckDuckGo,
            Engine::DuckDuckGo => Engine::Bing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Engine::Bing => "bing",
            Engine::DuckDuckGo => "duckduckgo",
        }
    }

    /// Build the results-page URL for a query.
    ///
    /// Bing honors a numeric offset of ten results per page; DuckDuckGo's
    /// HTML endpoint ignores pagination entirely.
    pub fn page_url(self, endpoints: &SearchEndpoints, query: &str, page: usize) -> String {
        let encoded = urlencoding::encode(query);
        match self {
            Engine::Bing => format!("{}/search?q={}&first={}", endpoints.bing, encoded, page * 10),
            Engine::DuckDuckGo => format!("{}/html/?q={}", endpoints.duckduckgo, encoded),
        }
    }

    /// Parse a results page with the engine's selector list.
    pub fn parse(self, html: &str) -> Vec<SearchHit> {
        match self {
            Engine::Bing => bing::parse_results(html),
            Engine::DuckDuckGo => duckduckgo::parse_results(html),
        }
    }
}

/// Retrieve search results for one query across `pages` result pages.
///
/// Starts on a randomly chosen engine and switches to the alternate engine
/// whenever a page fetch fails; the failed page is not retried. A
/// politeness sleep runs after each successfully fetched page.
///
/// # Arguments
///
/// * `endpoints` - engine base URLs (defaults target the live engines)
/// * `query` - free-text search query
/// * `pages` - number of result pages to request
/// * `language` - optional language tag shaping `Accept-Language`
/// * `delay` - politeness-sleep bounds between page requests
#[instrument(level = "info", skip_all, fields(%query, pages))]
pub async fn collect_hits(
    endpoints: &SearchEndpoints,
    query: &str,
    pages: usize,
    language: Option<&str>,
    delay: &DelayRange,
) -> Vec<SearchHit> {
    let mut engine = Engine::pick_random();
    let mut hits = Vec::new();

    for page in 0..pages {
        let page_url = engine.page_url(endpoints, query, page);
        match fetch_html(&page_url, language).await {
            Ok(html) => {
                let page_hits = engine.parse(&html);
                info!(
                    engine = engine.label(),
                    page,
                    count = page_hits.len(),
                    "Parsed search results page"
                );
                hits.extend(page_hits);
            }
            Err(e) => {
                warn!(
                    engine = engine.label(),
                    page,
                    error = %e,
                    "Search page fetch failed; switching engine"
                );
                engine = engine.other();
                continue;
            }
        }
        polite_sleep(delay).await;
    }

    info!(count = hits.len(), "Collected search hits for query");
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_engine_flips() {
        assert_eq!(Engine::Bing.other(), Engine::DuckDuckGo);
        assert_eq!(Engine::DuckDuckGo.other(), Engine::Bing);
    }

    #[test]
    fn test_bing_page_url_offsets_by_ten() {
        let endpoints = SearchEndpoints::default();
        let url = Engine::Bing.page_url(&endpoints, "remote work", 2);
        assert_eq!(url, "https://www.bing.com/search?q=remote%20work&first=20");
    }

    #[test]
    fn test_duckduckgo_page_url_ignores_page() {
        let endpoints = SearchEndpoints::default();
        let first = Engine::DuckDuckGo.page_url(&endpoints, "remote work", 0);
        let third = Engine::DuckDuckGo.page_url(&endpoints, "remote work", 2);
        assert_eq!(first, third);
        assert_eq!(first, "https://duckduckgo.com/html/?q=remote%20work");
    }
}
