//! Fetch classification and page extraction against a mock HTTP server.

use telework_corpus::extract::extract_from_url;
use telework_corpus::fetch::{fetch_html, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE_PAGE: &str = r#"
<html>
<head>
    <title>Remote Work Field Notes</title>
    <meta name="description" content="Observations from a distributed team">
</head>
<body>
    <article>
        Remote work rearranges the rhythms of a team. Meetings shrink, writing
        grows, and the office becomes a tool rather than a place. Over a year
        of observation the pattern held across every team we followed.
    </article>
    <p>stray footer paragraph</p>
</body>
</html>
"#;

#[tokio::test]
async fn fetch_returns_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html"))
        .mount(&server)
        .await;

    let body = fetch_html(&format!("{}/page", server.uri()), None)
        .await
        .unwrap();
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn fetch_classifies_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetch_html(&format!("{}/missing", server.uri()), None)
        .await
        .unwrap_err();
    match err {
        FetchError::Http { status } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected http error, got {other}"),
    }
}

#[tokio::test]
async fn fetch_rejects_non_html_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let err = fetch_html(&format!("{}/file.pdf", server.uri()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::UnsupportedContentType(_)));
}

#[tokio::test]
async fn extraction_builds_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE_PAGE, "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/article", server.uri());
    let record = extract_from_url(&url, None, 100).await.unwrap();

    assert_eq!(record.url, url);
    assert_eq!(record.title, "Remote Work Field Notes");
    assert_eq!(
        record.meta_description,
        "Observations from a distributed team"
    );
    assert!(record.content.contains("rearranges the rhythms"));
    // the article selector wins, so the stray paragraph stays out
    assert!(!record.content.contains("stray footer paragraph"));
    assert_eq!(record.language, "en");
    assert!(!record.extracted_at.is_empty());
}

#[tokio::test]
async fn failed_page_produces_no_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = extract_from_url(&format!("{}/broken", server.uri()), None, 100).await;
    assert!(result.is_err());
}
