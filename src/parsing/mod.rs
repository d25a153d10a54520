//! HTML parsing and structural lookup
//!
//! This module handles:
//! - Building a document tree from raw HTML
//! - Locating required elements with fail-fast semantics
//! - Resolving links and normalizing extracted text

mod locator;
mod soup;

pub use locator::{locate, locate_all, require_attr, Matcher, SearchDescriptor, TagNotFoundError};
pub use soup::{build_soup, element_text, flatten_newlines, nth_next_sibling, resolve_link};
