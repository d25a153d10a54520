//! HTML tree construction and small text helpers shared by the extractors

use scraper::{ElementRef, Html};
use url::Url;

/// Parses raw HTML into a navigable document
///
/// The parser is lenient: malformed markup still yields a tree, so structural
/// problems surface later as failed lookups rather than here.
pub fn build_soup(html: &str) -> Html {
    Html::parse_document(html)
}

/// Concatenated text of an element and all its descendants
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text with every newline replaced by a single space
pub fn flatten_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

/// Resolves an `href` against the page it appeared on
///
/// # Example
///
/// ```
/// use docs_parser::parsing::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://docs.python.org/3/whatsnew/").unwrap();
/// let url = resolve_link(&base, "3.12.html").unwrap();
/// assert_eq!(url.as_str(), "https://docs.python.org/3/whatsnew/3.12.html");
/// ```
pub fn resolve_link(base_url: &Url, href: &str) -> Result<Url, url::ParseError> {
    base_url.join(href.trim())
}

/// Walks `hops` raw sibling positions to the right of `element`
///
/// Text nodes (including whitespace between tags) count as positions. Returns
/// `None` if the walk runs off the end or lands on something other than an
/// element.
pub fn nth_next_sibling<'a>(element: ElementRef<'a>, hops: usize) -> Option<ElementRef<'a>> {
    let mut current = *element;
    for _ in 0..hops {
        current = current.next_sibling()?;
    }
    ElementRef::wrap(current)
}
