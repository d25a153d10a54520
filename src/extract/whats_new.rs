//! Release-notes extractor
//!
//! Walks the "What's New in Python" index and collects the title and the
//! editor/author block of every per-version article.

use crate::extract::progress_bar;
use crate::fetch::PageSource;
use crate::output::ResultSet;
use crate::parsing::{
    build_soup, element_text, flatten_newlines, locate, locate_all, require_attr, resolve_link,
    SearchDescriptor,
};
use crate::Result;
use url::Url;

/// Column names of the release-notes report
pub const WHATS_NEW_HEADER: [&str; 3] = ["Article link", "Title", "Editor, author"];

/// Builds the release-notes report
///
/// An article that fails to load is logged and left out; the remaining rows
/// keep their index order.
///
/// # Returns
///
/// * `Ok(Some(ResultSet))` - One row per article that loaded
/// * `Ok(None)` - The index page itself could not be fetched
/// * `Err(ParserError)` - The index or an article is missing an expected tag
pub async fn whats_new<S: PageSource>(source: &S, main_doc_url: &Url) -> Result<Option<ResultSet>> {
    let whats_new_url = resolve_link(main_doc_url, "whatsnew/")?;
    let Some(index) = source.fetch_page(whats_new_url.as_str()).await else {
        tracing::warn!("Release notes index {} is unavailable", whats_new_url);
        return Ok(None);
    };

    let article_links = parse_whats_new_index(&index, &whats_new_url)?;
    tracing::info!("Found {} release notes articles", article_links.len());

    let mut results = ResultSet::new(WHATS_NEW_HEADER);
    let pb = progress_bar(article_links.len());
    for link in article_links {
        pb.inc(1);
        let Some(article) = source.fetch_page(link.as_str()).await else {
            tracing::warn!("Skipping article {}", link);
            continue;
        };
        let (title, authors) = parse_article(&article)?;
        results.push([link.to_string(), title, authors]);
    }
    pb.finish_and_clear();

    Ok(Some(results))
}

/// Extracts the absolute article links from the release-notes index
pub fn parse_whats_new_index(html: &str, base_url: &Url) -> Result<Vec<Url>> {
    let soup = build_soup(html);
    let main_section = locate(
        soup.root_element(),
        &SearchDescriptor::tag("section").attr("id", "what-s-new-in-python"),
    )?;
    let wrapper = locate(
        main_section,
        &SearchDescriptor::tag("div").attr("class", "toctree-wrapper"),
    )?;

    locate_all(
        wrapper,
        &SearchDescriptor::tag("li").attr("class", "toctree-l1"),
    )
    .into_iter()
    .map(|item| -> Result<Url> {
        let anchor = locate(item, &SearchDescriptor::tag("a"))?;
        let href = require_attr(anchor, "href")?;
        Ok(resolve_link(base_url, href)?)
    })
    .collect()
}

/// Returns the article heading and its definition-list text on one line
pub fn parse_article(html: &str) -> Result<(String, String)> {
    let soup = build_soup(html);
    let heading = locate(soup.root_element(), &SearchDescriptor::tag("h1"))?;
    let details = locate(soup.root_element(), &SearchDescriptor::tag("dl"))?;
    Ok((
        element_text(heading),
        flatten_newlines(&element_text(details)),
    ))
}
