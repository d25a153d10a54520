//! Fetch layer behavior against a live mock server

use crate::create_test_fetcher;
use docs_parser::cache::ResponseCache;
use docs_parser::fetch::PageSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>cached</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let url = format!("{}/page", mock_server.uri());

    assert_eq!(fetcher.fetch_page(&url).await.as_deref(), Some("<p>cached</p>"));
    assert_eq!(fetcher.fetch_page(&url).await.as_deref(), Some("<p>cached</p>"));
    assert_eq!(fetcher.cache().count().unwrap(), 1);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let url = format!("{}/page", mock_server.uri());

    assert!(fetcher.fetch_page(&url).await.is_some());
    assert_eq!(fetcher.clear_cache().unwrap(), 1);
    assert!(fetcher.fetch_page(&url).await.is_some());
}

#[tokio::test]
async fn test_error_status_is_absence_and_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let url = format!("{}/missing", mock_server.uri());

    assert!(fetcher.fetch_page(&url).await.is_none());
    assert!(fetcher.fetch_page(&url).await.is_none());
    assert_eq!(fetcher.cache().count().unwrap(), 0);
}

#[tokio::test]
async fn test_connection_failure_is_absence() {
    // Nothing listens on the discard port
    let fetcher = create_test_fetcher();
    assert!(fetcher.fetch_bytes("http://127.0.0.1:9/page").await.is_none());
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'c', b'a', b'f', 0xE9]))
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let page = fetcher
        .fetch_page(&format!("{}/latin1", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(page, "caf\u{FFFD}");
}
