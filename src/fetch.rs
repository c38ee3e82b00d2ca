//! Shared HTTP fetching for search pages and article pages.
//!
//! All network traffic goes through one lazily built [`reqwest::Client`]
//! with fixed timeouts. Each request picks a random User-Agent from a fixed
//! pool and sends a small set of static browser-like headers; the
//! `Accept-Language` header follows the requested corpus language.
//!
//! Failures are classified into [`FetchError`] variants so callers can log
//! precisely, but the scrape pipeline treats every variant the same way:
//! log and skip the item. Nothing is retried; the only pacing between
//! requests is the politeness sleep in [`polite_sleep`].

use crate::config::DelayRange;
use once_cell::sync::Lazy;
use rand::Rng;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION,
    USER_AGENT,
};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Rotating pool of browser User-Agent strings.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPad; CPU OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1",
];

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to build HTTP client")
});

/// Errors raised while fetching a page.
///
/// The taxonomy exists for logging; the pipeline collapses every variant to
/// "no record produced" for the offending URL.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("http status {status}")]
    Http { status: reqwest::StatusCode },

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("body read error: {0}")]
    Body(String),
}

impl FetchError {
    fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Build the per-request header set with a randomly chosen User-Agent.
///
/// `language` tailors `Accept-Language`; `None` keeps the English default.
pub fn request_headers(language: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let ua = USER_AGENTS[rand::rng().random_range(0..USER_AGENTS.len())];
    headers.insert(USER_AGENT, HeaderValue::from_static(ua));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    let accept_language = match language {
        Some(lang) => format!("{lang},{lang}-US;q=0.9,en;q=0.8"),
        None => "en-US,en;q=0.5".to_string(),
    };
    if let Ok(value) = HeaderValue::from_str(&accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}

/// GET a page and return its body as text.
///
/// # Errors
///
/// Classifies the failure into a [`FetchError`]: invalid URL, timeout,
/// transport failure, non-success HTTP status, or a non-HTML content type.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn fetch_html(url: &str, language: Option<&str>) -> Result<String, FetchError> {
    let parsed = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed)
        .headers(request_headers(language))
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();
    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;
    debug!(bytes = body.len(), "Fetched page body");
    Ok(body)
}

/// Sleep for a randomized politeness delay between requests.
///
/// This reduces the chance of tripping anti-bot defenses; it is not a
/// correctness mechanism and an empty range disables it.
pub async fn polite_sleep(range: &DelayRange) {
    if let Some(delay) = range.sample() {
        debug!(?delay, "Politeness sleep between requests");
        tokio::time::sleep(delay).await;
    }
}
