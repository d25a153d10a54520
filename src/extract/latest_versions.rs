//! Version-index extractor
//!
//! Reads the documentation sidebar and lists every documented Python version
//! together with its support status.

use crate::fetch::PageSource;
use crate::output::ResultSet;
use crate::parsing::{build_soup, element_text, locate, locate_all, require_attr, SearchDescriptor};
use crate::{ParserError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Text identifying the version list among the sidebar lists
pub const VERSION_LIST_MARKER: &str = "All versions";

/// Column names of the version report
pub const VERSIONS_HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];

static VERSION_STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)")
        .expect("version pattern is valid")
});

/// Builds the version report from the documentation front page
///
/// # Returns
///
/// * `Ok(Some(ResultSet))` - One row per link in the version list
/// * `Ok(None)` - The front page could not be fetched
/// * `Err(ParserError)` - The sidebar or the version list is missing
pub async fn latest_versions<S: PageSource>(
    source: &S,
    main_doc_url: &Url,
) -> Result<Option<ResultSet>> {
    let Some(page) = source.fetch_page(main_doc_url.as_str()).await else {
        tracing::warn!("Documentation front page {} is unavailable", main_doc_url);
        return Ok(None);
    };

    parse_versions(&page, main_doc_url).map(Some)
}

/// Extracts version rows from the front page HTML
///
/// The sidebar holds several lists; the version list is the first one whose
/// text contains [`VERSION_LIST_MARKER`].
pub fn parse_versions(html: &str, page_url: &Url) -> Result<ResultSet> {
    let soup = build_soup(html);
    let sidebar = locate(
        soup.root_element(),
        &SearchDescriptor::tag("div").attr("class", "sphinxsidebarwrapper"),
    )?;

    let version_list = locate_all(sidebar, &SearchDescriptor::tag("ul"))
        .into_iter()
        .find(|list| element_text(*list).contains(VERSION_LIST_MARKER))
        .ok_or_else(|| {
            tracing::error!(
                "No sidebar list containing {:?} on {}",
                VERSION_LIST_MARKER,
                page_url
            );
            ParserError::NoMatchingSection {
                marker: VERSION_LIST_MARKER.to_string(),
                url: page_url.to_string(),
            }
        })?;

    let mut results = ResultSet::new(VERSIONS_HEADER);
    for anchor in locate_all(version_list, &SearchDescriptor::tag("a")) {
        let href = require_attr(anchor, "href")?;
        results.push(version_row(href, &element_text(anchor)));
    }

    Ok(results)
}

/// Splits a version link's text into version and status
///
/// Text that does not look like `Python 3.12 (stable)` is kept whole in the
/// version column with an empty status.
pub fn version_row(link: &str, text: &str) -> [String; 3] {
    match VERSION_STATUS_RE.captures(text) {
        Some(caps) => [
            link.to_string(),
            caps["version"].to_string(),
            caps["status"].to_string(),
        ],
        None => [link.to_string(), text.to_string(), String::new()],
    }
}
