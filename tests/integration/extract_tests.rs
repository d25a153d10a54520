//! End-to-end runs of every extraction mode

use crate::{create_test_config, create_test_fetcher};
use docs_parser::extract::{run_mode, Mode};
use docs_parser::ParserError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, page_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn article(version: &str) -> String {
    format!(
        "<html><body><section><h1>What's New In Python {}</h1>\n\
         <dl class=\"field-list simple\">\n<dt>Editor</dt>\n<dd>Jane Doe</dd>\n</dl>\
         </section></body></html>",
        version
    )
}

fn pep_page(status: &str) -> String {
    format!(
        "<html><body><dl class=\"rfc2822 field-list simple\">\n\
         <dt class=\"field-odd\">Author<span class=\"colon\">:</span></dt>\n\
         <dd class=\"field-odd\">Someone</dd>\n\
         <dt class=\"field-even\">Status<span class=\"colon\">:</span></dt>\n\
         <dd class=\"field-even\"><abbr>{}</abbr></dd>\n\
         </dl></body></html>",
        status
    )
}

#[tokio::test]
async fn test_whats_new_skips_missing_article() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/3/whatsnew/",
        r#"<html><body><section id="what-s-new-in-python">
            <div class="toctree-wrapper compound"><ul>
            <li class="toctree-l1"><a href="3.13.html">3.13</a></li>
            <li class="toctree-l1"><a href="3.12.html">3.12</a></li>
            <li class="toctree-l1"><a href="3.11.html">3.11</a></li>
            </ul></div></section></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/3/whatsnew/3.13.html", article("3.13")).await;
    mount_status(&mock_server, "/3/whatsnew/3.12.html", 404).await;
    mount_page(&mock_server, "/3/whatsnew/3.11.html", article("3.11")).await;

    let config = create_test_config(&mock_server, &dir.path().to_string_lossy());
    let fetcher = create_test_fetcher();

    let results = run_mode(Mode::WhatsNew, &fetcher, &config)
        .await
        .unwrap()
        .expect("index was served");

    assert_eq!(results.len(), 2);
    assert_eq!(
        results.rows()[0],
        vec![
            format!("{}/3/whatsnew/3.13.html", mock_server.uri()),
            "What's New In Python 3.13".to_string(),
            " Editor Jane Doe ".to_string(),
        ]
    );
    assert!(results.rows()[1][0].ends_with("3.11.html"));
}

#[tokio::test]
async fn test_latest_versions_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/3/",
        r#"<html><body><div class="sphinxsidebarwrapper">
            <ul><li><a href="download.html">Download</a></li></ul>
            <ul>
            <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
            <li><a href="https://docs.python.org/3.8/">Python 3.8 (EOL)</a></li>
            <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
            </ul></div></body></html>"#
            .to_string(),
    )
    .await;

    let config = create_test_config(&mock_server, &dir.path().to_string_lossy());
    let fetcher = create_test_fetcher();

    let results = run_mode(Mode::LatestVersions, &fetcher, &config)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(
        results.rows()[1],
        vec!["https://docs.python.org/3.8/", "3.8", "EOL"]
    );
}

#[tokio::test]
async fn test_download_writes_archive() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let downloads_dir = dir.path().join("downloads");

    mount_page(
        &mock_server,
        "/3/download.html",
        r#"<html><body><table class="docutils">
            <tr><td><a href="archives/python-docs-pdf-letter.zip">Letter</a></td></tr>
            <tr><td><a href="archives/python-docs-pdf-a4.zip">A4</a></td></tr>
            </table></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/archives/python-docs-pdf-a4.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04archive".to_vec()))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server, &downloads_dir.to_string_lossy());
    let fetcher = create_test_fetcher();

    let results = run_mode(Mode::Download, &fetcher, &config).await.unwrap();
    assert!(results.is_none());

    let written = std::fs::read(downloads_dir.join("python-docs-pdf-a4.zip")).unwrap();
    assert_eq!(written, b"PK\x03\x04archive");
}

#[tokio::test]
async fn test_pep_validation_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/peps/",
        r#"<html><body><section id="numerical-index"><table>
            <thead><tr><th>Type</th><th>PEP</th></tr></thead>
            <tbody>
            <tr><td><abbr>PA</abbr></td><td><a href="pep-0001/">1</a></td></tr>
            <tr><td><abbr>SF</abbr></td><td><a href="pep-0008/">8</a></td></tr>
            <tr><td><abbr>SF</abbr></td><td><a href="pep-0020/">20</a></td></tr>
            <tr><td><abbr>S</abbr></td><td><a href="pep-0099/">99</a></td></tr>
            </tbody></table></section></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/peps/pep-0001/", pep_page("Active")).await;
    mount_page(&mock_server, "/peps/pep-0008/", pep_page("Final")).await;
    mount_page(&mock_server, "/peps/pep-0020/", pep_page("Active")).await;
    mount_status(&mock_server, "/peps/pep-0099/", 503).await;

    let config = create_test_config(&mock_server, &dir.path().to_string_lossy());
    let fetcher = create_test_fetcher();

    let results = run_mode(Mode::Pep, &fetcher, &config).await.unwrap().unwrap();

    let rows: Vec<(String, String)> = results
        .rows()
        .iter()
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect();
    let count = |code: &str| {
        rows.iter()
            .find(|(c, _)| c == code)
            .map(|(_, n)| n.as_str())
            .unwrap()
    };

    assert_eq!(count("A"), "1");
    assert_eq!(count("F"), "1");
    assert_eq!(count(""), "0");
    // PEP 20 mismatches; PEP 99 could not be fetched
    assert_eq!(rows.last().unwrap(), &("Totals".to_string(), "3".to_string()));
}

#[tokio::test]
async fn test_pep_unknown_code_aborts() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/peps/",
        r#"<section id="numerical-index"><table><tbody>
            <tr><td>IX</td><td><a href="pep-0001/">1</a></td></tr>
            </tbody></table></section>"#
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/peps/pep-0001/", pep_page("Active")).await;

    let config = create_test_config(&mock_server, &dir.path().to_string_lossy());
    let fetcher = create_test_fetcher();

    let err = run_mode(Mode::Pep, &fetcher, &config).await.unwrap_err();
    assert!(matches!(err, ParserError::UnknownStatusCode { ref code, .. } if code == "X"));
}

#[tokio::test]
async fn test_unavailable_top_level_page_yields_nothing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_status(&mock_server, "/3/whatsnew/", 500).await;
    mount_status(&mock_server, "/3/", 500).await;
    mount_status(&mock_server, "/3/download.html", 500).await;
    mount_status(&mock_server, "/peps/", 500).await;

    let config = create_test_config(&mock_server, &dir.path().to_string_lossy());
    let fetcher = create_test_fetcher();

    for mode in [Mode::WhatsNew, Mode::LatestVersions, Mode::Download, Mode::Pep] {
        let results = run_mode(mode, &fetcher, &config).await.unwrap();
        assert!(results.is_none(), "{} should produce nothing", mode);
    }
}

#[tokio::test]
async fn test_layout_change_is_fatal() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/3/whatsnew/",
        "<html><body><p>This page has moved</p></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server, &dir.path().to_string_lossy());
    let fetcher = create_test_fetcher();

    let err = run_mode(Mode::WhatsNew, &fetcher, &config).await.unwrap_err();
    assert!(matches!(err, ParserError::TagNotFound(_)));
}
