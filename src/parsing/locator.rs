//! Fail-fast tag lookup
//!
//! Every structural lookup the extractors perform goes through [`locate`].
//! A lookup that finds nothing means the page layout no longer matches what
//! the extractors expect, so it is logged and returned as an error rather
//! than papered over with an empty node.

use regex::Regex;
use scraper::ElementRef;
use std::fmt;
use thiserror::Error;

/// Raised when a search descriptor matches no element
#[derive(Debug, Clone, Error)]
#[error("Tag not found: {descriptor}")]
pub struct TagNotFoundError {
    /// Rendering of the descriptor that failed, e.g. `<section id="numerical-index">`
    pub descriptor: String,
}

impl TagNotFoundError {
    /// Creates the error and logs it at error level
    pub fn new(descriptor: impl Into<String>) -> Self {
        let descriptor = descriptor.into();
        tracing::error!("Tag not found: {}", descriptor);
        Self { descriptor }
    }
}

/// How a single attribute or text value is compared
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Attribute only has to be present
    Present,
    /// Value must equal the string exactly
    Exact(String),
    /// Value must contain a match of the regex
    Pattern(Regex),
}

impl Matcher {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Present => true,
            Self::Exact(expected) => value == expected,
            Self::Pattern(re) => re.is_match(value),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => Ok(()),
            Self::Exact(expected) => write!(f, "={:?}", expected),
            Self::Pattern(re) => write!(f, "=~/{}/", re.as_str()),
        }
    }
}

/// Tag name plus attribute and text filters identifying one element
///
/// # Matching rules
///
/// - A `None` tag name matches any element.
/// - `class` filters are tested against each whitespace-separated class as
///   well as the whole attribute, so `class="toctree-wrapper compound"`
///   matches `toctree-wrapper`.
/// - The text filter is tested against the element's own text children, not
///   the text of its descendants: `<dt>Status<span>:</span></dt>` matches
///   the exact text `Status`.
#[derive(Debug, Clone, Default)]
pub struct SearchDescriptor {
    tag: Option<String>,
    attrs: Vec<(String, Matcher)>,
    text: Option<Matcher>,
}

impl SearchDescriptor {
    /// Matches elements with the given tag name
    pub fn tag(name: &str) -> Self {
        Self {
            tag: Some(name.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Matches elements of any tag name
    pub fn any() -> Self {
        Self::default()
    }

    /// Requires `name` to equal `value`
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs
            .push((name.to_string(), Matcher::Exact(value.to_string())));
        self
    }

    /// Requires `name` to match `pattern`
    pub fn attr_pattern(mut self, name: &str, pattern: &Regex) -> Self {
        self.attrs
            .push((name.to_string(), Matcher::Pattern(pattern.clone())));
        self
    }

    /// Requires `name` to be present with any value
    pub fn has_attr(mut self, name: &str) -> Self {
        self.attrs.push((name.to_string(), Matcher::Present));
        self
    }

    /// Requires an own text child equal to `text`
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(Matcher::Exact(text.to_string()));
        self
    }

    /// Tests a single element against every filter
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();

        if let Some(tag) = &self.tag {
            if value.name() != tag {
                return false;
            }
        }

        let attrs_match = self.attrs.iter().all(|(name, matcher)| {
            let Some(actual) = value.attr(name) else {
                return false;
            };
            if name == "class" {
                matcher.matches(actual) || value.classes().any(|class| matcher.matches(class))
            } else {
                matcher.matches(actual)
            }
        });
        if !attrs_match {
            return false;
        }

        match &self.text {
            Some(matcher) => element
                .children()
                .filter_map(|child| child.value().as_text())
                .any(|text| matcher.matches(&text.text)),
            None => true,
        }
    }
}

impl fmt::Display for SearchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag.as_deref().unwrap_or("*"))?;
        for (name, matcher) in &self.attrs {
            write!(f, " {}{}", name, matcher)?;
        }
        if let Some(text) = &self.text {
            write!(f, " text{}", text)?;
        }
        write!(f, ">")
    }
}

/// Returns the first descendant of `scope` matching `descriptor`
///
/// The search is depth-first in document order and excludes `scope` itself.
///
/// # Returns
///
/// * `Ok(ElementRef)` - The first matching element
/// * `Err(TagNotFoundError)` - Nothing matched; the failure has been logged
///
/// # Example
///
/// ```
/// use docs_parser::parsing::{build_soup, locate, SearchDescriptor};
///
/// let soup = build_soup(r#"<section id="intro"><h1>Hello</h1></section>"#);
/// let section = locate(soup.root_element(), &SearchDescriptor::tag("section").attr("id", "intro")).unwrap();
/// let heading = locate(section, &SearchDescriptor::tag("h1")).unwrap();
/// assert_eq!(heading.text().collect::<String>(), "Hello");
/// ```
pub fn locate<'a>(
    scope: ElementRef<'a>,
    descriptor: &SearchDescriptor,
) -> Result<ElementRef<'a>, TagNotFoundError> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| descriptor.matches(*element))
        .ok_or_else(|| TagNotFoundError::new(descriptor.to_string()))
}

/// Returns every descendant of `scope` matching `descriptor`, in document order
///
/// Unlike [`locate`] an empty result is not an error.
pub fn locate_all<'a>(scope: ElementRef<'a>, descriptor: &SearchDescriptor) -> Vec<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| descriptor.matches(*element))
        .collect()
}

/// Reads a required attribute off an element located earlier
pub fn require_attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str, TagNotFoundError> {
    element.value().attr(name).ok_or_else(|| {
        let descriptor = SearchDescriptor::tag(element.value().name()).has_attr(name);
        TagNotFoundError::new(descriptor.to_string())
    })
}
