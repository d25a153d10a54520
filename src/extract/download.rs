//! Documentation archive download
//!
//! Finds the A4 PDF archive on the download page and saves it locally.

use crate::fetch::PageSource;
use crate::parsing::{build_soup, locate, require_attr, resolve_link, SearchDescriptor};
use crate::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use url::Url;

/// `href` pattern of the A4 PDF archive link
pub const ARCHIVE_HREF_PATTERN: &str = r".+pdf-a4\.zip$";

static ARCHIVE_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ARCHIVE_HREF_PATTERN).expect("archive pattern is valid"));

/// Downloads the A4 PDF archive into `downloads_dir`
///
/// # Returns
///
/// * `Ok(Some(PathBuf))` - Where the archive was written
/// * `Ok(None)` - The download page or the archive could not be fetched
/// * `Err(ParserError)` - The archive link is missing, or the file could not be written
pub async fn download<S: PageSource>(
    source: &S,
    main_doc_url: &Url,
    downloads_dir: &Path,
) -> Result<Option<PathBuf>> {
    let downloads_url = resolve_link(main_doc_url, "download.html")?;
    let Some(page) = source.fetch_page(downloads_url.as_str()).await else {
        tracing::warn!("Download page {} is unavailable", downloads_url);
        return Ok(None);
    };

    let archive_url = find_archive_url(&page, &downloads_url)?;
    tracing::info!("Archive link: {}", archive_url);

    let Some(archive) = source.fetch_bytes(archive_url.as_str()).await else {
        tracing::warn!("Archive {} is unavailable", archive_url);
        return Ok(None);
    };

    std::fs::create_dir_all(downloads_dir)?;
    let archive_path = downloads_dir.join(archive_file_name(&archive_url));
    std::fs::write(&archive_path, &archive)?;
    tracing::info!("Archive downloaded and saved: {}", archive_path.display());

    Ok(Some(archive_path))
}

/// Locates the archive link on the download page and makes it absolute
pub fn find_archive_url(html: &str, page_url: &Url) -> Result<Url> {
    let soup = build_soup(html);
    let table = locate(
        soup.root_element(),
        &SearchDescriptor::tag("table").attr("class", "docutils"),
    )?;
    let anchor = locate(
        table,
        &SearchDescriptor::tag("a").attr_pattern("href", &ARCHIVE_HREF_RE),
    )?;
    let href = require_attr(anchor, "href")?;
    Ok(resolve_link(page_url, href)?)
}

/// Last path segment of the archive URL
fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.zip")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserError;

    const DOWNLOAD_PAGE: &str = r#"
        <html><body>
        <table class="docutils align-default">
            <tr><td>PDF (US-Letter)</td><td><a href="archives/python-3.12.1-docs-pdf-letter.zip">Download</a></td></tr>
            <tr><td>PDF (A4)</td><td><a href="archives/python-3.12.1-docs-pdf-a4.zip">Download</a></td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_find_archive_url() {
        let page = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let url = find_archive_url(DOWNLOAD_PAGE, &page).unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.python.org/3/archives/python-3.12.1-docs-pdf-a4.zip"
        );
    }

    #[test]
    fn test_missing_archive_link_is_fatal() {
        let page = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let html = r#"<table class="docutils"><tr><td><a href="docs.epub">EPUB</a></td></tr></table>"#;
        let err = find_archive_url(html, &page).unwrap_err();
        assert!(matches!(err, ParserError::TagNotFound(e) if e.descriptor.contains("pdf-a4")));
    }

    #[test]
    fn test_archive_file_name() {
        let url = Url::parse("https://docs.python.org/3/archives/python-docs-pdf-a4.zip").unwrap();
        assert_eq!(archive_file_name(&url), "python-docs-pdf-a4.zip");

        let url = Url::parse("https://docs.python.org/").unwrap();
        assert_eq!(archive_file_name(&url), "archive.zip");
    }
}
